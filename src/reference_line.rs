use crate::math::{heading, LookupTable, ParametricCurve2d, Point2d};
use crate::sl::SlPoint;
use crate::util::Interval;
use crate::LaneId;
pub use curve::{PathCurve, PathSample};
use smallvec::SmallVec;

mod curve;

/// The quantization of the road width LUT, in m.
const WIDTH_LUT_SPACING: f64 = 1.0;

/// The lanes covering a single arc length, in map order.
pub type LaneList = SmallVec<[LaneId; 4]>;

/// The geometric queries the pull over engine makes of the path the vehicle is following.
pub trait ReferencePath {
    /// The length of the path in m.
    fn length(&self) -> f64;

    /// Converts a path relative coordinate into world space.
    fn sl_to_xy(&self, sl: SlPoint) -> Option<Point2d>;

    /// Converts a world space point into a path relative coordinate.
    fn xy_to_sl(&self, point: Point2d) -> Option<SlPoint>;

    /// The road's extent either side of the path at the given arc length.
    fn road_width(&self, s: f64) -> RoadWidth;

    /// The heading of the path at the given arc length, in radians.
    fn heading(&self, s: f64) -> f64;

    /// The lanes covering the given arc length.
    fn lanes_at(&self, s: f64) -> LaneList;

    /// The regions of the given kind that the path passes through.
    fn overlaps(&self, kind: OverlapKind) -> &[Interval<f64>];
}

/// The distance from the path to each edge of the road, in m.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoadWidth {
    pub left: f64,
    pub right: f64,
}

/// Map regions in which a vehicle must not stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapKind {
    Crosswalk,
    Junction,
    ClearArea,
    SpeedBump,
}

impl OverlapKind {
    pub const ALL: [OverlapKind; 4] = [
        OverlapKind::Crosswalk,
        OverlapKind::Junction,
        OverlapKind::ClearArea,
        OverlapKind::SpeedBump,
    ];
}

/// The attributes of a reference line.
pub struct ReferenceLineAttributes<'a> {
    /// A curve defining the centre line of the path.
    pub curve: &'a dyn ParametricCurve2d,
    /// The road width as a function of arc length.
    pub road_width: &'a dyn Fn(f64) -> RoadWidth,
}

/// An in-memory reference path built from a centre line curve.
#[derive(Clone)]
pub struct ReferenceLine {
    /// The geometry of the path.
    curve: PathCurve,
    /// The road width, sampled along the path.
    road_width: LookupTable<RoadWidth>,
    /// The lanes the path passes through, with the arc lengths they cover.
    lanes: Vec<(LaneId, Interval<f64>)>,
    /// The overlapping regions of each kind, indexed by [OverlapKind].
    overlaps: [Vec<Interval<f64>>; 4],
}

impl ReferenceLine {
    /// Creates a new reference line.
    pub fn new(attribs: &ReferenceLineAttributes) -> Self {
        let curve = PathCurve::new(&attribs.curve);
        let road_width =
            LookupTable::from_samples(curve.bounds(), WIDTH_LUT_SPACING, attribs.road_width);
        Self {
            curve,
            road_width,
            lanes: vec![],
            overlaps: Default::default(),
        }
    }

    /// Gets the curve representing the path's centre line.
    pub fn curve(&self) -> &PathCurve {
        &self.curve
    }

    /// Records that the path runs along the given lane between `start_s` and `end_s`.
    pub fn add_lane_segment(&mut self, lane_id: LaneId, start_s: f64, end_s: f64) {
        self.lanes.push((lane_id, Interval::new(start_s, end_s)));
    }

    /// Records that the path passes through a region of the given kind.
    pub fn add_overlap(&mut self, kind: OverlapKind, start_s: f64, end_s: f64) {
        self.overlaps[kind as usize].push(Interval::new(start_s, end_s));
    }
}

impl ReferencePath for ReferenceLine {
    fn length(&self) -> f64 {
        self.curve.length()
    }

    fn sl_to_xy(&self, sl: SlPoint) -> Option<Point2d> {
        let point = self.curve.sample(sl.s, sl.l);
        (point.x.is_finite() && point.y.is_finite()).then_some(point)
    }

    fn xy_to_sl(&self, point: Point2d) -> Option<SlPoint> {
        self.curve
            .inverse_sample(point)
            .map(|(s, l)| SlPoint::new(s, l))
    }

    fn road_width(&self, s: f64) -> RoadWidth {
        *self.road_width.sample(s)
    }

    fn heading(&self, s: f64) -> f64 {
        heading(self.curve.sample_centre(s).tan)
    }

    fn lanes_at(&self, s: f64) -> LaneList {
        self.lanes
            .iter()
            .filter(|(_, range)| range.contains(s))
            .map(|(lane_id, _)| *lane_id)
            .collect()
    }

    fn overlaps(&self, kind: OverlapKind) -> &[Interval<f64>] {
        &self.overlaps[kind as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::LineSegment2d;
    use crate::{HdMap, LaneAttributes};
    use assert_approx_eq::assert_approx_eq;

    fn straight_line() -> ReferenceLine {
        let line = LineSegment2d::from_ends(Point2d::new(0.0, 0.0), Point2d::new(300.0, 0.0));
        ReferenceLine::new(&ReferenceLineAttributes {
            curve: &line,
            road_width: &|s| RoadWidth {
                left: 1.75,
                right: if s < 150.0 { 1.75 } else { 4.0 },
            },
        })
    }

    #[test]
    fn sl_round_trip_on_straight_path() {
        let path = straight_line();
        assert_approx_eq!(path.length(), 300.0, 0.001);

        let point = path.sl_to_xy(SlPoint::new(140.0, -2.0)).unwrap();
        assert_approx_eq!(point.x, 140.0, 0.001);
        assert_approx_eq!(point.y, -2.0, 0.001);

        let sl = path.xy_to_sl(point).unwrap();
        assert_approx_eq!(sl.s, 140.0, 0.001);
        assert_approx_eq!(sl.l, -2.0, 0.001);
        assert_approx_eq!(path.heading(140.0), 0.0);
    }

    #[test]
    fn road_width_is_sampled() {
        let path = straight_line();
        assert_eq!(path.road_width(100.0).right, 1.75);
        assert_eq!(path.road_width(200.0).right, 4.0);
        assert_eq!(path.road_width(-10.0).right, 1.75);
        assert_eq!(path.road_width(1000.0).right, 4.0);
    }

    #[test]
    fn lanes_and_overlaps() {
        let mut map = HdMap::new();
        let a = map.add_lane(&LaneAttributes::default());
        let b = map.add_lane(&LaneAttributes::default());

        let mut path = straight_line();
        path.add_lane_segment(a, 0.0, 100.0);
        path.add_lane_segment(b, 100.0, 300.0);
        path.add_overlap(OverlapKind::Crosswalk, 115.0, 120.0);

        assert_eq!(path.lanes_at(50.0).as_slice(), &[a]);
        assert_eq!(path.lanes_at(100.0).as_slice(), &[a, b]);
        assert!(path.lanes_at(400.0).is_empty());
        assert_eq!(path.overlaps(OverlapKind::Crosswalk), &[Interval::new(115.0, 120.0)]);
        assert!(path.overlaps(OverlapKind::Junction).is_empty());
    }
}
