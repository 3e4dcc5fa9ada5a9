use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Projects a point onto a local coordinate system.
///
/// # Parameters
/// * `point` - The point to project
/// * `origin` - The origin of the coordinate system
/// * `x_axis` - The basis vector pointing in the positive x-axis.
/// * `y_axis` - The basis vector pointing in the positive y-axis.
pub fn project_local(
    point: Point2d,
    origin: Point2d,
    x_axis: Vector2d,
    y_axis: Vector2d,
) -> Point2d {
    let point = point - origin;
    Point2d::new(point.dot(x_axis), point.dot(y_axis))
}

/// Rotates a vector 90 degrees anti-clockwise, so that a tangent
/// becomes the normal pointing to its left.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// The heading of a vector in radians, measured anti-clockwise from the x-axis.
pub fn heading(vec: Vector2d) -> f64 {
    vec.y.atan2(vec.x)
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn project_onto_rotated_frame() {
        let tan = Vector2d::new(0.0, 1.0);
        let p = project_local(Point2d::new(-2.0, 13.0), Point2d::new(0.0, 10.0), rot90(tan), tan);
        assert_approx_eq!(p.x, 2.0);
        assert_approx_eq!(p.y, 3.0);
        assert_approx_eq!(heading(tan), std::f64::consts::FRAC_PI_2);
    }
}
