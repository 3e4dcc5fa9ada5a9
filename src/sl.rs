//! Coordinates and boxes relative to a reference path.

use crate::util::Interval;
use serde::{Deserialize, Serialize};

/// A position relative to a reference path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlPoint {
    /// The arc length along the path in m.
    pub s: f64,
    /// The lateral offset from the path in m, positive to the left.
    pub l: f64,
}

impl SlPoint {
    pub const fn new(s: f64, l: f64) -> Self {
        Self { s, l }
    }
}

/// An axis-aligned box in (s, l) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// The longitudinal extents in m.
    pub s: Interval<f64>,
    /// The lateral extents in m.
    pub l: Interval<f64>,
}

impl Footprint {
    /// Creates a footprint from its four edges.
    pub fn new(start_s: f64, end_s: f64, start_l: f64, end_l: f64) -> Self {
        Self {
            s: Interval::new(start_s, end_s),
            l: Interval::new(start_l, end_l),
        }
    }

    pub fn start_s(&self) -> f64 {
        self.s.min
    }

    pub fn end_s(&self) -> f64 {
        self.s.max
    }

    pub fn start_l(&self) -> f64 {
        self.l.min
    }

    pub fn end_l(&self) -> f64 {
        self.l.max
    }

    /// Returns true if the two footprints share any point.
    /// Boxes touching along an edge count as overlapping.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.s.intersects(&other.s) && self.l.intersects(&other.l)
    }
}

#[cfg(test)]
mod test {
    use super::Footprint;

    #[test]
    fn overlap_requires_both_axes() {
        let spot = Footprint::new(134.0, 141.0, -3.5, -1.0);
        assert!(spot.overlaps(&Footprint::new(136.0, 139.0, -3.0, -2.0)));
        assert!(spot.overlaps(&Footprint::new(141.0, 145.0, -1.0, 0.0)));
        // Same s range, but in the travel lane
        assert!(!spot.overlaps(&Footprint::new(136.0, 139.0, -0.5, 1.5)));
        // Same l range, but behind the spot
        assert!(!spot.overlaps(&Footprint::new(120.0, 130.0, -3.0, -2.0)));
    }
}
