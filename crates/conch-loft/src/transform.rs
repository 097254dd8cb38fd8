//! Per-step point transform.

use conch_math::{Axis, Point3};

/// Transform a source profile point into its position on one shell ring.
///
/// The coordinate along `axis` is pulled toward the apex center `cen` and
/// scaled (`c' = (c - cen) * scal + cen`); the two perpendicular
/// coordinates are rotated around the axis by `rot` and scaled by `scal`.
/// X rotates the (Y, Z) pair, Y the (Z, X) pair, Z the (X, Y) pair; the
/// sign conventions fix the shell's chirality and are not interchangeable
/// between axes.
///
/// With `scal = 1` and `rot = 0` the point is returned unchanged.
pub fn transform_point(axis: Axis, rot: f64, scal: f64, cen: f64, p: &Point3) -> Point3 {
    let (sin, cos) = rot.sin_cos();
    match axis {
        Axis::X => Point3::new(
            (p.x - cen) * scal + cen,
            p.y * scal * cos - p.z * scal * sin,
            p.y * scal * sin + p.z * scal * cos,
        ),
        Axis::Y => Point3::new(
            p.x * scal * cos - p.z * scal * sin,
            (p.y - cen) * scal + cen,
            p.x * scal * sin + p.z * scal * cos,
        ),
        Axis::Z => Point3::new(
            p.x * scal * cos - p.y * scal * sin,
            p.x * scal * sin + p.y * scal * cos,
            (p.z - cen) * scal + cen,
        ),
    }
}
