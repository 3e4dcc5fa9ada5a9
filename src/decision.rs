use crate::math::Point2d;
use crate::ObstacleId;
use serde::{Deserialize, Serialize};

/// Why the vehicle is being asked to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReasonCode {
    PullOver,
}

impl StopReasonCode {
    pub fn name(&self) -> &'static str {
        match self {
            StopReasonCode::PullOver => "STOP_REASON_PULL_OVER",
        }
    }
}

/// A longitudinal constraint requiring the vehicle to stop behind an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopDecision {
    pub reason_code: StopReasonCode,
    /// The signed distance from the obstacle at which to stop, in m.
    /// Negative values stop short of the obstacle.
    pub distance_s: f64,
    /// The heading of the vehicle when stopped, in radians.
    pub stop_heading: f64,
    /// The world space point at which to stop.
    pub stop_point: Point2d,
}

/// A [StopDecision] attached to an obstacle by a traffic rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalDecision {
    /// The name of the rule that made the decision.
    pub tag: String,
    /// The obstacle the decision applies to.
    pub obstacle_id: ObstacleId,
    pub decision: StopDecision,
}
