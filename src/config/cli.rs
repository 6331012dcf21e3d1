use std::path::PathBuf;

use clap::Parser;

use super::Config;

/// Command-line arguments. Anything given here wins over the config file.
#[derive(Debug, Default, Parser)]
#[command(name = "orrery", about = "Animated solar system viewer")]
pub struct CliArgs {
    /// RON file describing the system and view; built-in defaults if absent
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory textures are loaded from
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Don't draw orbit rings
    #[arg(long)]
    pub no_orbits: bool,

    /// Step the model this many times without opening a window, then print
    /// where everything ended up
    #[arg(long)]
    pub headless_frames: Option<u64>,
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.view.width = w;
        }
        if let Some(h) = args.height {
            self.view.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
        if let Some(ref dir) = args.assets {
            self.view.asset_root = dir.clone();
        }
        if args.no_orbits {
            self.view.show_orbits = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from(&[
            "orrery",
            "--width",
            "1920",
            "--assets",
            "/srv/textures",
            "--no-orbits",
        ]);
        config.apply_cli_overrides(&args);

        assert_eq!(config.view.width, 1920);
        assert_eq!(config.view.asset_root, PathBuf::from("/srv/textures"));
        assert!(!config.view.show_orbits);
        // Untouched
        assert_eq!(config.view.height, 720);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_headless_flag() {
        let args = CliArgs::parse_from(&["orrery", "--headless-frames", "629"]);
        assert_eq!(args.headless_frames, Some(629));
        assert!(args.config.is_none());
    }
}
