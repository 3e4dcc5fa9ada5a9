//! The interface shared by traffic rules, and the decider which runs them.

use crate::config::VehicleParams;
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::error::Result;
use crate::map::LaneMap;
use crate::obstacle::PathDecision;
use crate::planning_state::PlanningState;
use crate::reference_line::ReferencePath;
use crate::sl::Footprint;
use log::error;

/// Everything a traffic rule may read or modify during one planning cycle.
pub struct Frame<'a> {
    /// The path the vehicle is following.
    pub reference_line: &'a dyn ReferencePath,
    /// The lanes the path runs along.
    pub map: &'a dyn LaneMap,
    /// The obstacles on the path, and the decisions made about them.
    pub path_decision: &'a mut PathDecision,
    /// State carried over from the previous cycle.
    pub planning_state: &'a mut PlanningState,
    /// The ego vehicle's extents relative to the path.
    pub adc_sl_boundary: Footprint,
    /// The ego vehicle's dimensions.
    pub vehicle: VehicleParams,
}

impl Frame<'_> {
    /// The arc length of the front of the ego vehicle.
    pub fn adc_front_edge_s(&self) -> f64 {
        self.adc_sl_boundary.end_s()
    }
}

/// A rule which adds decisions to the path each planning cycle.
pub trait TrafficRule {
    /// The name used to tag the rule's decisions.
    fn name(&self) -> &'static str;

    /// Applies the rule to the current frame.
    fn apply(&self, frame: &mut Frame) -> Result<()>;
}

/// Applies a sequence of traffic rules, in order.
#[derive(Default)]
pub struct TrafficDecider {
    /// The rules, in the order they are applied.
    rules: Vec<Box<dyn TrafficRule>>,
    /// Debugging information from the previous cycle.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl TrafficDecider {
    /// Creates a decider with no rules.
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a rule, to be applied after those already added.
    pub fn add_rule(&mut self, rule: impl TrafficRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Returns an iterator over the names of the rules, in order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Applies every rule to the frame.
    /// A failing rule is logged and does not prevent later rules from running.
    pub fn execute(&mut self, frame: &mut Frame) {
        for rule in &self.rules {
            if let Err(err) = rule.apply(frame) {
                error!("rule[{}] failed: {}", rule.name(), err);
            }
        }

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }
    }

    /// Gets the debugging information for the previous cycle as a JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> serde_json::Value {
        self.debug.clone()
    }
}
