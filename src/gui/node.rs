use std::path::{Path, PathBuf};
use std::rc::Rc;

use kiss3d::scene::SceneNode;
use nalgebra::{Point3, Translation3};

use crate::model::{BodyNode, BodySpec, Material};

const FALLBACK_COLOR: (f32, f32, f32) = (0.5, 0.5, 0.5);

/// An unscaled kiss3d group that a body moves around, plus where to find the
/// textures for anything that gets attached to it.
///
/// kiss3d stores a sphere's radius in its node's scale, and scale is inherited
/// by children. So the body's sphere hangs off the group as a leaf, and moons
/// are attached to the group itself.
pub struct MeshNode {
    frame: SceneNode,
    asset_root: Rc<PathBuf>,
}

impl MeshNode {
    pub fn new(frame: SceneNode, asset_root: &Path) -> Self {
        MeshNode {
            frame,
            asset_root: Rc::new(asset_root.to_owned()),
        }
    }

    pub fn scene_node(&mut self) -> &mut SceneNode {
        &mut self.frame
    }

    /// Adds an empty child frame, at this frame's origin.
    pub fn add_frame(&mut self) -> MeshNode {
        MeshNode {
            frame: self.frame.add_group(),
            asset_root: self.asset_root.clone(),
        }
    }

    /// Adds a textured/colored sphere at this frame's origin. Nothing should
    /// be attached under the returned node.
    pub fn add_sphere(&mut self, radius: f32, material: &Material) -> SceneNode {
        let mut sphere = self.frame.add_sphere(radius);
        apply_material(&mut sphere, material, &self.asset_root);
        sphere
    }
}

impl BodyNode for MeshNode {
    fn attach_child(&mut self, spec: &BodySpec) -> Self {
        tracing::debug!(name = %spec.name, radius = spec.radius, "adding body");
        let mut frame = self.add_frame();
        frame.add_sphere(spec.radius, &spec.material);
        frame
    }

    fn set_local_position(&mut self, position: &Point3<f64>) {
        let position: Point3<f32> = nalgebra::convert(*position);
        self.frame
            .set_local_translation(Translation3::from(position.coords));
    }
}

/// What a material turns into once the asset root has been searched.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    Textured(PathBuf),
    Flat(f32, f32, f32),
}

pub fn resolve_material(material: &Material, asset_root: &Path) -> Appearance {
    match material {
        Material::Color(r, g, b) => Appearance::Flat(*r, *g, *b),
        Material::Texture(relative) => {
            let path = asset_root.join(relative);
            if texture_exists(&path) {
                Appearance::Textured(path)
            } else {
                let (r, g, b) = FALLBACK_COLOR;
                Appearance::Flat(r, g, b)
            }
        }
    }
}

pub fn apply_material(node: &mut SceneNode, material: &Material, asset_root: &Path) {
    match resolve_material(material, asset_root) {
        Appearance::Textured(path) => {
            set_texture(node, &path);
            node.set_color(1.0, 1.0, 1.0);
        }
        Appearance::Flat(r, g, b) => node.set_color(r, g, b),
    }
}

/// Logs if the texture isn't there. kiss3d panics on a missing file, so
/// check before handing it a path.
pub fn texture_exists(path: &Path) -> bool {
    let found = path.is_file();
    if !found {
        tracing::warn!(path = %path.display(), "texture not found, using a flat color");
    }
    found
}

pub fn set_texture(node: &mut SceneNode, path: &Path) {
    // Textures are cached by name, so shared ones only load once
    let name = path.to_string_lossy();
    node.set_texture_from_file(path, &name);
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use super::*;

    #[test]
    fn test_missing_texture_is_not_found() {
        assert!(!texture_exists(Path::new("no/such/texture.png")));
        let dir = tempfile::tempdir().unwrap();
        assert!(!texture_exists(dir.path()));
    }

    #[test]
    fn test_missing_texture_falls_back_to_grey() {
        let dir = tempfile::tempdir().unwrap();
        let material = Material::Texture("textures/2k_mars.jpg".into());
        assert_eq!(
            resolve_material(&material, dir.path()),
            Appearance::Flat(0.5, 0.5, 0.5)
        );

        // Nothing to draw on a bare node, but it mustn't reach kiss3d's loader
        let mut node = SceneNode::new_empty();
        apply_material(&mut node, &material, dir.path());
    }

    #[test]
    fn test_texture_resolved_against_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("textures")).unwrap();
        let path = dir.path().join("textures").join("2k_mars.jpg");
        std::fs::write(&path, b"").unwrap();

        let material = Material::Texture("textures/2k_mars.jpg".into());
        assert_eq!(
            resolve_material(&material, dir.path()),
            Appearance::Textured(path)
        );
    }

    #[test]
    fn test_color_material() {
        let material = Material::Color(0.2, 0.4, 0.6);
        assert_eq!(
            resolve_material(&material, Path::new("anywhere")),
            Appearance::Flat(0.2, 0.4, 0.6)
        );
    }

    #[test]
    fn test_moon_frames_are_unscaled() {
        let mut root = MeshNode::new(SceneNode::new_empty(), Path::new("assets"));
        let mut mars = root.add_frame();
        let mut phobos = mars.add_frame();
        mars.set_local_position(&Point3::new(25.0, 0.0, 0.0));
        phobos.set_local_position(&Point3::new(2.0, 0.0, 0.0));

        for frame in [&mut root, &mut mars, &mut phobos] {
            let data = frame.scene_node().data();
            assert_eq!(data.local_scale(), Vector3::new(1.0, 1.0, 1.0));
            assert!(!data.has_object());
        }
        assert_eq!(
            phobos.scene_node().data().local_translation(),
            Translation3::new(2.0, 0.0, 0.0)
        );
    }
}
