//! Planning state which persists from one planning cycle to the next.
//!
//! The state is owned by the caller and lent to the traffic rules for the
//! duration of a cycle. Only one cycle may hold it at a time.

use crate::math::Point2d;
use serde::{Deserialize, Serialize};

/// Why the vehicle has been asked to pull over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullOverReason {
    #[default]
    Destination,
    Emergency,
}

impl PullOverReason {
    pub fn name(&self) -> &'static str {
        match self {
            PullOverReason::Destination => "DESTINATION",
            PullOverReason::Emergency => "EMERGENCY",
        }
    }
}

/// The state of an in-progress pull over.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PullOverStatus {
    /// Whether pull over mode is active. Set by the caller.
    pub in_pull_over: bool,
    /// Why pull over mode was entered. Set by the caller.
    pub reason: PullOverReason,
    /// Where the vehicle begins to leave its lane.
    pub start_point: Option<Point2d>,
    /// Where the vehicle comes to rest.
    pub stop_point: Option<Point2d>,
    /// The heading of the vehicle at the stop point, in radians.
    pub stop_point_heading: Option<f64>,
}

/// A pull over stop point committed by a previous cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommittedStop {
    pub start_point: Point2d,
    pub stop_point: Point2d,
    pub stop_heading: f64,
}

/// The planning state carried between cycles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningState {
    pull_over: Option<PullOverStatus>,
}

impl PlanningState {
    /// Creates an empty planning state.
    pub fn new() -> Self {
        Default::default()
    }

    /// Enters or leaves pull over mode.
    pub fn set_pull_over(&mut self, in_pull_over: bool, reason: PullOverReason) {
        let status = self.pull_over.get_or_insert_with(Default::default);
        status.in_pull_over = in_pull_over;
        status.reason = reason;
    }

    /// Whether the vehicle is in pull over mode.
    pub fn is_pull_over(&self) -> bool {
        self.pull_over.as_ref().is_some_and(|s| s.in_pull_over)
    }

    /// The reason for pulling over, if a pull over has been requested.
    pub fn pull_over_reason(&self) -> Option<PullOverReason> {
        self.pull_over.as_ref().map(|s| s.reason)
    }

    pub fn pull_over(&self) -> Option<&PullOverStatus> {
        self.pull_over.as_ref()
    }

    /// The committed stop, if both its start and stop points are set.
    pub fn committed_stop(&self) -> Option<CommittedStop> {
        let status = self.pull_over.as_ref()?;
        Some(CommittedStop {
            start_point: status.start_point?,
            stop_point: status.stop_point?,
            stop_heading: status.stop_point_heading.unwrap_or(0.0),
        })
    }

    /// Records the stop chosen this cycle.
    pub fn commit_pull_over(&mut self, stop: CommittedStop) {
        let status = self.pull_over.get_or_insert_with(Default::default);
        status.start_point = Some(stop.start_point);
        status.stop_point = Some(stop.stop_point);
        status.stop_point_heading = Some(stop.stop_heading);
    }

    /// Forgets the committed stop, leaving the caller's mode and reason in place.
    pub fn clear_pull_over_points(&mut self) {
        if let Some(status) = self.pull_over.as_mut() {
            status.start_point = None;
            status.stop_point = None;
            status.stop_point_heading = None;
        }
    }
}
