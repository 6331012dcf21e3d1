//! Static configuration: which bodies exist, what they look like, and how the
//! window and camera are set up. Everything has a default, so a config file
//! only needs to mention what it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{BodySpec, Material, StarSpec};

mod cli;
mod error;

pub use cli::CliArgs;
pub use error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub system: SystemConfig,
    pub view: ViewConfig,
    /// Log filter (error, warn, info, debug, trace, or a full directive)
    pub log_level: String,
}

/// The bodies themselves, plus the backdrop they sit in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub sun: StarSpec,
    pub planets: Vec<BodySpec>,
    pub skybox: Option<SkyboxSpec>,
}

/// Six images making up the background cube, relative to `dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyboxSpec {
    pub dir: PathBuf,
    pub px: String,
    pub nx: String,
    pub py: String,
    pub ny: String,
    pub pz: String,
    pub nz: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub framerate_limit: Option<u64>,
    /// Texture paths are resolved against this
    pub asset_root: PathBuf,
    pub show_orbits: bool,
    pub show_hud: bool,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub eye: (f32, f32, f32),
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: bool,
    pub damping_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            system: SystemConfig::default(),
            view: ViewConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        let texture = |name: &str| Material::Texture(Path::new("textures").join(name));
        let moon = texture("2k_moon.jpg");

        SystemConfig {
            sun: StarSpec {
                name: "Sun".to_owned(),
                radius: 5.0,
                material: texture("2k_sun.jpg"),
            },
            planets: vec![
                BodySpec::new("Mercury", 0.5, 10.0, 0.01, texture("2k_mercury.jpg")),
                BodySpec::new("Venus", 0.8, 15.0, 0.007, texture("2k_venus_surface.jpg")),
                BodySpec::new("Earth", 1.0, 20.0, 0.005, texture("2k_earth_daymap.jpg"))
                    .with_moon(BodySpec::new("Moon", 0.3, 3.0, 0.015, moon.clone())),
                BodySpec::new("Mars", 0.7, 25.0, 0.003, texture("2k_mars.jpg"))
                    .with_moon(BodySpec::new("Phobos", 0.1, 2.0, 0.02, moon.clone()))
                    .with_moon(BodySpec::new("Deimos", 0.2, 3.0, 0.015, moon)),
            ],
            skybox: Some(SkyboxSpec {
                dir: Path::new("textures").join("cubeMap"),
                px: "px.png".to_owned(),
                nx: "nx.png".to_owned(),
                py: "py.png".to_owned(),
                ny: "ny.png".to_owned(),
                pz: "pz.png".to_owned(),
                nz: "nz.png".to_owned(),
            }),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            title: "Solar System".to_owned(),
            width: 1280,
            height: 720,
            framerate_limit: Some(60),
            asset_root: PathBuf::from("assets"),
            show_orbits: true,
            show_hud: true,
            camera: CameraConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            fovy_degrees: 50.0,
            znear: 0.1,
            zfar: 1000.0,
            eye: (0.0, 25.0, 70.0),
            min_distance: 20.0,
            max_distance: 200.0,
            damping: true,
            damping_factor: 0.05,
        }
    }
}

impl SkyboxSpec {
    /// Face paths in the usual cube map order: +x, -x, +y, -y, +z, -z.
    pub fn face_paths(&self) -> [PathBuf; 6] {
        [
            self.dir.join(&self.px),
            self.dir.join(&self.nx),
            self.dir.join(&self.py),
            self.dir.join(&self.ny),
            self.dir.join(&self.pz),
            self.dir.join(&self.nz),
        ]
    }
}

impl Config {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        ron::from_str(s).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }
}
