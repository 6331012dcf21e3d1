use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;
use std::path::Path;

use kiss3d::scene::SceneNode;
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

use super::node::{set_texture, texture_exists};
use crate::config::SkyboxSpec;

/// Where each face of a cube of half-width `half_extent` goes, in the order
/// +x, -x, +y, -y, +z, -z. kiss3d quads lie in the xy plane facing +z; each
/// one gets turned to face the origin.
pub fn face_transforms(half_extent: f32) -> [Isometry3<f32>; 6] {
    let face = |offset: Vector3<f32>, axis: Unit<Vector3<f32>>, angle: f32| {
        Isometry3::from_parts(
            Translation3::from(offset * half_extent),
            UnitQuaternion::from_axis_angle(&axis, angle),
        )
    };
    [
        face(Vector3::x(), Vector3::y_axis(), -FRAC_PI_2),
        face(-Vector3::x(), Vector3::y_axis(), FRAC_PI_2),
        face(Vector3::y(), Vector3::x_axis(), FRAC_PI_2),
        face(-Vector3::y(), Vector3::x_axis(), -FRAC_PI_2),
        face(Vector3::z(), Vector3::y_axis(), PI),
        face(-Vector3::z(), Vector3::y_axis(), 0.0),
    ]
}

/// Builds the background cube under `parent`. Faces whose image is missing
/// are left out.
pub fn add_skybox(
    parent: &mut SceneNode,
    spec: &SkyboxSpec,
    asset_root: &Path,
    half_extent: f32,
) -> SceneNode {
    let mut group = parent.add_group();
    let side = 2.0 * half_extent;

    let transforms = face_transforms(half_extent);
    let paths = spec.face_paths();
    for (transform, relative) in transforms.iter().zip(paths.iter()) {
        let path = asset_root.join(relative);
        if !texture_exists(&path) {
            continue;
        }
        let mut quad = group.add_quad(side, side, 1, 1);
        set_texture(&mut quad, &path);
        quad.set_color(1.0, 1.0, 1.0);
        quad.enable_backface_culling(false);
        quad.set_local_transformation(*transform);
    }

    group
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::*;
    use crate::config::SystemConfig;

    #[test]
    fn test_missing_faces_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let spec = SystemConfig::default().skybox.unwrap();
        let mut root = SceneNode::new_empty();
        let skybox = add_skybox(&mut root, &spec, dir.path(), 450.0);

        let mut faces = 0;
        skybox.data().apply_to_objects(&mut |_| faces += 1);
        assert_eq!(faces, 0);
    }

    #[test]
    fn test_faces_surround_origin() {
        let expected_centers = [
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ];

        for (t, dir) in face_transforms(450.0).iter().zip(expected_centers.iter()) {
            let center = t * Point3::origin();
            assert_relative_eq!(center.coords, dir * 450.0, epsilon = 1e-3);

            // The quad's +z normal should point back at the origin
            let normal = t * Vector3::z();
            assert_relative_eq!(normal, -dir, epsilon = 1e-5);
        }
    }
}
