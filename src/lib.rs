pub mod config;
pub mod gui;
pub mod headless;
pub mod logging;
pub mod model;
