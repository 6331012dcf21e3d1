use kiss3d::window::Window;

use nalgebra::Point3;

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    // Zero segments would divide by zero below
    let num_segments = num_segments.max(1);
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Points on a circle of the given radius around `center`, in the x-z plane,
/// using the same phase convention as the orbits themselves.
pub fn ring_points(
    center: Point3<f64>,
    radius: f64,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>> {
    let f = move |theta: f64| -> Point3<f32> {
        let pt = Point3::new(
            center.x + radius * theta.sin(),
            center.y,
            center.z + radius * theta.cos(),
        );
        nalgebra::convert(pt)
    };
    path_iter_parametric(f, 0.0, std::f64::consts::TAU, num_segments)
}

pub fn draw_path<I: Iterator<Item = Point3<f32>>>(
    window: &mut Window,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            window.draw_line(&prev_pt, &pt, color);
        }
        prev_pt = Some(pt);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_parametric_endpoints() {
        let pts: Vec<_> =
            path_iter_parametric(|t: f32| Point3::new(t, 0.0, 0.0), 1.0, 3.0, 4).collect();
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[0].x, 1.0);
        assert_relative_eq!(pts[2].x, 2.0);
        assert_relative_eq!(pts[4].x, 3.0);
    }

    #[test]
    fn test_ring_is_closed_and_round() {
        let center = Point3::new(20.0, 0.0, -5.0);
        let pts: Vec<_> = ring_points(center, 3.0, 64).collect();
        assert_eq!(pts.len(), 65);
        assert_relative_eq!(pts[0], pts[64], epsilon = 1e-5);
        // Starts where an orbit at angle 0 would be
        assert_relative_eq!(pts[0], Point3::new(20.0, 0.0, -2.0), epsilon = 1e-5);

        let center: Point3<f32> = nalgebra::convert(center);
        for p in pts {
            assert_relative_eq!((p - center).norm(), 3.0, epsilon = 1e-4);
            assert_eq!(p.y, 0.0);
        }
    }
}
