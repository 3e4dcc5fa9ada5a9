pub use cgmath;
pub use config::{
    PullOverConfig, VehicleParams, CHECK_STEP, MAX_CHECK_ITERATIONS, PARKING_SPOT_LONGITUDINAL_BUFFER,
};
pub use decision::{LongitudinalDecision, StopDecision, StopReasonCode};
pub use error::{PlanningError, Result};
pub use map::{HdMap, Lane, LaneAttributes, LaneMap, LaneTurn, LaneType};
pub use obstacle::{Obstacle, ObstacleAttributes, PathDecision};
pub use planning_state::{CommittedStop, PlanningState, PullOverReason, PullOverStatus};
pub use pull_over::{
    LaneSuitability, PullOver, PullOverOutcome, PullOverPhase, StopPoint, PULL_OVER_RULE_NAME,
};
pub use reference_line::{
    LaneList, OverlapKind, PathCurve, ReferenceLine, ReferenceLineAttributes, ReferencePath,
    RoadWidth,
};
pub use sl::{Footprint, SlPoint};
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use traffic_rule::{Frame, TrafficDecider, TrafficRule};
pub use util::Interval;

mod config;
mod debug;
mod decision;
mod error;
mod map;
pub mod math;
mod obstacle;
mod planning_state;
mod pull_over;
mod reference_line;
mod sl;
mod traffic_rule;
mod util;

new_key_type! {
    /// Unique ID of a [Lane].
    pub struct LaneId;
    /// Unique ID of an [Obstacle].
    pub struct ObstacleId;
}

type LaneSet = SlotMap<LaneId, Lane>;
type ObstacleSet = SlotMap<ObstacleId, Obstacle>;
