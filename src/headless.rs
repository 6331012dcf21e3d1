use std::fmt;

use nalgebra::Point3;

use crate::config::SystemConfig;
use crate::model::system;

/// Where one body ended up after a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub name: String,
    pub angle: f64,
    /// Relative to the parent
    pub local: Point3<f64>,
    /// Relative to the sun
    pub world: Point3<f64>,
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} angle {:>8.4}  local ({:>7.3}, {:>7.3})  world ({:>7.3}, {:>7.3})",
            self.name, self.angle, self.local.x, self.local.z, self.world.x, self.world.z,
        )
    }
}

/// Steps the system `frames` times with no window, pretending to run at
/// 60 Hz, and returns every body's final pose (parents before moons).
pub fn run(system_config: &SystemConfig, frames: u64) -> Vec<Pose> {
    let mut bodies = system::build(&system_config.planets, &mut ());
    for frame in 0..frames {
        system::step(frame as f64 / 60.0, &mut bodies);
    }

    let mut poses = Vec::with_capacity(system::count(&bodies));
    system::visit_orbits(&bodies, |center, body| {
        poses.push(Pose {
            name: body.spec().name.clone(),
            angle: body.angle(),
            local: body.position(),
            world: center + body.position().coords,
        });
    });

    tracing::debug!(frames, bodies = poses.len(), "headless run finished");
    poses
}
