use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a body looks. The model never inspects this, it just hands it to the
/// renderer when the body's node is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Image file, relative to the asset root
    Texture(PathBuf),
    /// Flat color, components in 0..=1
    Color(f32, f32, f32),
}

impl Default for Material {
    fn default() -> Self {
        Material::Color(0.5, 0.5, 0.5)
    }
}

// All the immutable info about a body. Built once from the config and never
// touched again; the runtime tree only borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub radius: f32,
    /// Orbital radius, measured from the parent
    pub distance: f64,
    /// Radians added to the orbital angle on every step, sign gives direction
    pub speed: f64,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub moons: Vec<BodySpec>,
}

impl BodySpec {
    pub fn new(name: &str, radius: f32, distance: f64, speed: f64, material: Material) -> Self {
        BodySpec {
            name: name.to_owned(),
            radius,
            distance,
            speed,
            material,
            moons: vec![],
        }
    }

    pub fn with_moon(mut self, moon: BodySpec) -> Self {
        self.moons.push(moon);
        self
    }

    /// Number of bodies in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.moons.iter().map(BodySpec::count).sum::<usize>()
    }
}

/// The body everything orbits. It sits at the scene origin and never moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSpec {
    pub name: String,
    pub radius: f32,
    #[serde(default)]
    pub material: Material,
}
