use std::error::Error;

use clap::Parser;
use kiss3d::window::{CanvasSetup, NumSamples, Window};

use rust_orrery::config::{CliArgs, Config};
use rust_orrery::gui::Scene;
use rust_orrery::model::BodySpec;
use rust_orrery::{headless, logging};

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);
    logging::init_logging(&config.log_level);

    let bodies: usize = config.system.planets.iter().map(BodySpec::count).sum();
    match args.config {
        Some(ref path) => tracing::info!(path = %path.display(), bodies, "loaded config"),
        None => tracing::info!(bodies, "using the built-in system"),
    }

    if let Some(frames) = args.headless_frames {
        for pose in headless::run(&config.system, frames) {
            println!("{}", pose);
        }
        return Ok(());
    }

    let view = &config.view;
    let setup = CanvasSetup {
        vsync: true,
        samples: NumSamples::Four,
    };
    let mut window = Window::new_with_setup(&view.title, view.width, view.height, setup);
    Scene::new(&mut window, &config).draw_loop(&mut window);
    Ok(())
}
