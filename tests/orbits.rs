use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Point3;
use rust_orrery::config::{Config, SystemConfig};
use rust_orrery::headless;
use rust_orrery::model::{build, step};

/// The bundled system after ten seconds at 60 fps. Every planet has swept
/// 600 * speed radians, and the moons likewise about their own planets.
#[test]
fn test_reference_system_after_600_frames() {
    let system = SystemConfig::default();
    let poses = headless::run(&system, 600);

    let names: Vec<_> = poses.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Mercury", "Venus", "Earth", "Moon", "Mars", "Phobos", "Deimos"]
    );

    let expected_angles = [6.0, 4.2, 3.0, 9.0, 1.8, 12.0, 9.0];
    let distances = [10.0, 15.0, 20.0, 3.0, 25.0, 2.0, 3.0];
    for ((pose, &angle), &d) in poses.iter().zip(&expected_angles).zip(&distances) {
        assert_abs_diff_eq!(pose.angle, angle, epsilon = 1e-9);
        assert_relative_eq!(
            pose.local,
            Point3::new(d * angle.sin(), 0.0, d * angle.cos()),
            epsilon = 1e-8
        );
    }

    // Moons are placed relative to their planet
    let earth = &poses[2];
    let moon = &poses[3];
    assert_eq!(earth.world, earth.local);
    assert_relative_eq!(moon.world, earth.world + moon.local.coords, epsilon = 1e-12);
    assert_abs_diff_eq!(
        (moon.world - earth.world).norm(),
        3.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_zero_frames_is_first_pose() {
    let poses = headless::run(&SystemConfig::default(), 0);
    for pose in poses {
        assert_eq!(pose.angle, 0.0);
        assert_eq!(pose.local.y, 0.0);
        assert_eq!(pose.local.z, 0.0);
    }
}

#[test]
fn test_bundled_file_drives_the_same_motion() {
    let from_file =
        Config::from_ron_str(include_str!("../solar-system.ron")).expect("bundled config parses");
    let defaults = Config::default();

    let mut a = build(&from_file.system.planets, &mut ());
    let mut b = build(&defaults.system.planets, &mut ());
    for i in 0..100 {
        step(i as f64, &mut a);
        step(i as f64, &mut b);
    }
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.position(), y.position());
    }
}
