//! The pull over traffic rule.
//!
//! While the vehicle is in pull over mode, each cycle either re-validates the
//! stop point committed by a previous cycle, or searches ahead along the path
//! for a new one. A valid stop point becomes a stop decision on a virtual wall,
//! and is remembered in the [PlanningState]. If no stop point can be found the
//! vehicle is instead asked to stop in its lane.

use crate::config::PullOverConfig;
use crate::error::{PlanningError, Result};
use crate::math::Point2d;
use crate::planning_state::PlanningState;
use crate::sl::SlPoint;
use crate::traffic_rule::{Frame, TrafficRule};
use log::{debug, error};

mod search;
mod stop;
mod validate;

pub use search::LaneSuitability;

/// The name of the pull over rule, used to tag its decisions.
pub const PULL_OVER_RULE_NAME: &str = "PULL_OVER";

/// Prefix of the ID given to the pull over stop wall.
const PULL_OVER_VO_ID_PREFIX: &str = "PO_";

/// Selects a roadside stop point and asks the vehicle to stop there.
#[derive(Clone, Debug)]
pub struct PullOver {
    config: PullOverConfig,
}

/// A validated stop point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopPoint {
    /// The stop point relative to the reference path.
    pub sl: SlPoint,
    /// The stop point in world space.
    pub point: Point2d,
}

/// The result of applying the pull over rule for one cycle.
#[derive(Debug)]
pub enum PullOverOutcome {
    /// The vehicle is not in pull over mode.
    Inactive,
    /// A stop was committed at a roadside spot.
    /// `reused` is set when the spot was carried over from a previous cycle.
    PullOver { stop: SlPoint, reused: bool },
    /// No spot was found, so the vehicle stops in its lane.
    InLane { stop_line_s: f64 },
    /// A stop could not be committed.
    Aborted(PlanningError),
}

/// The progress of a pull over across cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullOverPhase {
    /// Pull over mode is not active.
    Inactive,
    /// Looking for a spot, and stopping in lane until one is found.
    Searching,
    /// A spot has been committed.
    Committed,
}

/// Where this cycle's stop point came from.
enum StopLookup {
    /// The previously committed stop point is still valid.
    Reused(StopPoint),
    /// A new stop point was found.
    Found(StopPoint),
    /// No stop point was found before the search gave up.
    Exhausted { last_checked_s: f64 },
}

impl PullOver {
    /// Creates the rule, checking the configuration.
    pub fn new(config: PullOverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Gets the rule's configuration.
    pub fn config(&self) -> &PullOverConfig {
        &self.config
    }

    /// The current phase of the pull over, as recorded in the planning state.
    pub fn phase(state: &PlanningState) -> PullOverPhase {
        if !state.is_pull_over() {
            PullOverPhase::Inactive
        } else if state.committed_stop().is_some() {
            PullOverPhase::Committed
        } else {
            PullOverPhase::Searching
        }
    }

    /// Runs the rule for one cycle.
    pub fn plan(&self, frame: &mut Frame) -> PullOverOutcome {
        if !frame.planning_state.is_pull_over() {
            return PullOverOutcome::Inactive;
        }

        let (stop, reused) = match self.get_pull_over_stop(frame) {
            StopLookup::Reused(stop) => (stop, true),
            StopLookup::Found(stop) => (stop, false),
            StopLookup::Exhausted { last_checked_s } => {
                debug!("Could not find a safe pull over point");
                return match self.build_in_lane_stop(frame, last_checked_s) {
                    Ok(stop_line_s) => PullOverOutcome::InLane { stop_line_s },
                    Err(err) => PullOverOutcome::Aborted(err),
                };
            }
        };

        match self.build_pull_over_stop(frame, stop) {
            Ok(()) => PullOverOutcome::PullOver {
                stop: stop.sl,
                reused,
            },
            Err(err) => PullOverOutcome::Aborted(err),
        }
    }

    /// Reuses the committed stop point if it is still valid, otherwise searches for a new one.
    fn get_pull_over_stop(&self, frame: &Frame) -> StopLookup {
        if let Some(committed) = frame.planning_state.committed_stop() {
            let sl = frame.reference_line.xy_to_sl(committed.stop_point);
            match sl {
                Some(sl) if self.is_valid_stop(frame, sl) => {
                    return StopLookup::Reused(StopPoint {
                        sl,
                        point: committed.stop_point,
                    });
                }
                _ => debug!("committed stop point {:?} is no longer valid", committed.stop_point),
            }
        }

        let result = self.find_pull_over_stop(frame);
        match result.stop {
            Some(stop) => StopLookup::Found(stop),
            None => StopLookup::Exhausted {
                last_checked_s: result.last_checked_s,
            },
        }
    }
}

impl TrafficRule for PullOver {
    fn name(&self) -> &'static str {
        PULL_OVER_RULE_NAME
    }

    fn apply(&self, frame: &mut Frame) -> Result<()> {
        if let PullOverOutcome::Aborted(err) = self.plan(frame) {
            error!("pull over stop was not committed: {}", err);
        }
        Ok(())
    }
}
