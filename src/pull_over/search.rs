use super::{PullOver, StopPoint};
use crate::map::{Lane, LaneMap, LaneTurn, LaneType};
use crate::reference_line::{OverlapKind, ReferencePath};
use crate::traffic_rule::Frame;
use log::debug;

/// Whether the lane at a sampled arc length is somewhere the vehicle may pull over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneSuitability {
    /// The lane is not a turning lane.
    pub no_turn: bool,
    /// No driving lane lies to the right of the lane.
    pub rightmost: bool,
    /// The sample lies within a crosswalk, junction, clear area or speed bump.
    pub on_overlap: bool,
}

impl LaneSuitability {
    /// Whether the vehicle may pull over here.
    pub fn is_suitable(&self) -> bool {
        self.no_turn && self.rightmost && !self.on_overlap
    }
}

/// The outcome of a forward search for a stop point.
pub(crate) struct SearchResult {
    /// The first valid stop point found.
    pub stop: Option<StopPoint>,
    /// The last arc length examined by the search.
    pub last_checked_s: f64,
}

impl PullOver {
    /// Scans forward from the front of the vehicle for a stretch of suitable lane
    /// at least `plan_distance` long which ends in a clear parking spot.
    pub(crate) fn find_pull_over_stop(&self, frame: &Frame) -> SearchResult {
        let step = self.config.check_step;
        let mut check_length = 0.0;
        let mut total_check_length = 0.0;
        let mut check_s = frame.adc_front_edge_s();

        while total_check_length < self.config.max_check_distance {
            check_s += step;
            total_check_length += step;

            let Some(suitability) = lane_suitability(frame, check_s) else {
                debug!("check_s[{}] has no lane", check_s);
                check_length = 0.0;
                continue;
            };
            if !suitability.is_suitable() {
                debug!("check_s[{}] can't pull over: {:?}", check_s, suitability);
                check_length = 0.0;
                continue;
            }

            check_length += step;
            if check_length >= self.config.plan_distance {
                match self.find_pull_over_stop_at(frame, check_s) {
                    Some(stop) => {
                        debug!("stop point: s[{}] ({}, {})", check_s, stop.point.x, stop.point.y);
                        return SearchResult {
                            stop: Some(stop),
                            last_checked_s: check_s,
                        };
                    }
                    None => {
                        debug!("parking spot at s[{}] is not available", check_s);
                        check_length = 0.0;
                    }
                }
            }
        }

        SearchResult {
            stop: None,
            last_checked_s: check_s,
        }
    }
}

/// Classifies the lane the path follows at arc length `s`.
/// Returns `None` if no lane covering `s` can be found in the map.
pub(crate) fn lane_suitability(frame: &Frame, s: f64) -> Option<LaneSuitability> {
    let mut lanes = frame.reference_line.lanes_at(s);
    lanes.dedup();
    let lane = lanes.iter().find_map(|id| frame.map.lane(*id))?;
    debug!("check_s[{}] lane[{:?}]", s, lane.id());

    Some(LaneSuitability {
        no_turn: lane.turn() == LaneTurn::NoTurn,
        rightmost: is_rightmost_driving_lane(frame.map, lane),
        on_overlap: on_overlap(frame.reference_line, s),
    })
}

/// Determines whether any city driving lane lies to the right of the lane.
fn is_rightmost_driving_lane(map: &dyn LaneMap, lane: &Lane) -> bool {
    for neighbor_id in lane.right_neighbors() {
        let Some(neighbor) = map.lane(*neighbor_id) else {
            debug!("Failed to find lane[{:?}]", neighbor_id);
            continue;
        };
        if neighbor.lane_type() == LaneType::CityDriving {
            debug!(
                "lane[{:?}]'s right neighbor forward lane[{:?}] is a driving lane",
                lane.id(),
                neighbor_id
            );
            return false;
        }
    }
    true
}

/// Determines whether `s` lies within a region the vehicle must not stop in.
fn on_overlap(path: &dyn ReferencePath, s: f64) -> bool {
    OverlapKind::ALL
        .iter()
        .any(|kind| path.overlaps(*kind).iter().any(|zone| zone.contains(s)))
}
