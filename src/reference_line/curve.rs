use crate::math::{
    equidistant_points_along_curve, project_local, project_point_onto_curve, rot90,
    ParametricCurve2d, Point2d, QuadraticBezier2d, Vector2d,
};
use crate::util::Interval;
use cgmath::prelude::*;

/// An arc length parameterised approximation of a reference path's centre line.
#[derive(Clone)]
pub struct PathCurve {
    scale: f64,
    length: f64,
    segments: Vec<QuadraticBezier2d>,
}

/// The result of sampling a [PathCurve].
pub struct PathSample {
    /// The point on the centre line.
    pub pos: Point2d,
    /// The tangent unit vector of the centre line.
    pub tan: Vector2d,
}

impl PathCurve {
    /// Creates a new [PathCurve] from the given parametric curve,
    /// with the default step size.
    pub fn new(curve: &impl ParametricCurve2d) -> Self {
        const PATH_SEGMENT_LEN: f64 = 0.5;
        Self::with_step(curve, PATH_SEGMENT_LEN)
    }

    /// Creates a new [PathCurve] from the given parametric curve,
    /// with the given step size.
    pub fn with_step(curve: &impl ParametricCurve2d, step: f64) -> Self {
        let (mut points, length) = equidistant_points_along_curve(curve, step);

        // A degenerate curve still needs a segment to sample
        if points.len() == 1 {
            let p = points[0];
            points.push(p + Vector2d::new(step, 0.0));
        }

        // Ensure number of points are odd so they can be evenly divided among segments
        if points.len() % 2 == 0 {
            let p1 = points[points.len() - 2];
            let p2 = points[points.len() - 1];
            let p3 = Point2d::from_vec(Vector2d::lerp(p1.to_vec(), p2.to_vec(), 2.0));
            points.push(p3);
        }

        let segments = points
            .windows(3)
            .step_by(2)
            .map(|points| {
                let (p1, p2, p3) = (points[0], points[1], points[2]);
                let mid = Vector2d::lerp(p1.to_vec(), p3.to_vec(), 0.5);
                let control = Point2d::from_vec(Vector2d::lerp(p2.to_vec(), mid, -1.0));
                QuadraticBezier2d::new(&[p1, control, p3])
            })
            .collect::<Vec<_>>();

        Self {
            scale: 0.5 / step,
            length,
            segments,
        }
    }

    /// The length of the curve in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Samples the centre line and returns the position and tangent unit vector.
    ///
    /// # Parameters
    /// * `s` - The arc length along the curve
    pub fn sample_centre(&self, s: f64) -> PathSample {
        let (segment, t) = self.sample_internal(s);
        PathSample {
            pos: segment.sample(t),
            tan: segment.sample_dt(t).normalize(),
        }
    }

    /// Samples the point at the given arc length and lateral offset.
    pub fn sample(&self, s: f64, l: f64) -> Point2d {
        let sample = self.sample_centre(s);
        sample.pos + rot90(sample.tan) * l
    }

    /// The inverse of the `sample` function.
    /// Returns the arc length and lateral offset of the point.
    pub fn inverse_sample(&self, point: Point2d) -> Option<(f64, f64)> {
        let s = project_point_onto_curve(self, point, 0.001, None)?;
        let sample = self.sample_centre(s);
        let local = project_local(point, sample.pos, rot90(sample.tan), sample.tan);
        Some((s + local.y, local.x))
    }

    /// Finds the bezier segment containing the given arc length,
    /// and the parameter within that segment.
    fn sample_internal(&self, s: f64) -> (&QuadraticBezier2d, f64) {
        let pos = s * self.scale;
        let idx = usize::min(pos as u32 as usize, self.segments.len() - 1);
        (&self.segments[idx], pos - (idx as f64))
    }
}

impl ParametricCurve2d for PathCurve {
    fn sample(&self, t: f64) -> Point2d {
        let (segment, t) = self.sample_internal(t);
        segment.sample(t)
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, self.length())
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        let (segment, t) = self.sample_internal(t);
        segment.sample_dt(t)
    }

    fn sample_dt2(&self, t: f64) -> Vector2d {
        let (segment, t) = self.sample_internal(t);
        segment.sample_dt2(t)
    }
}
