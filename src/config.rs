//! Pull over tuning and vehicle dimensions.

use crate::error::{PlanningError, Result};
use serde::{Deserialize, Serialize};

/// The longitudinal margin added in front of and behind a parking spot, in m.
pub const PARKING_SPOT_LONGITUDINAL_BUFFER: f64 = 1.0;

/// The distance advanced along the path between lane checks, in m.
pub const CHECK_STEP: f64 = 5.0;

/// The most lane checks a single search may make.
pub const MAX_CHECK_ITERATIONS: f64 = 10_000.0;

/// The tuning parameters of the pull over rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullOverConfig {
    /// The clearance needed ahead of the vehicle to manoeuvre into a spot, in m.
    pub operation_length: f64,
    /// The lateral margin between the vehicle and the road edge, in m.
    pub buffer_to_boundary: f64,
    /// The furthest distance ahead of the vehicle to search, in m.
    pub max_check_distance: f64,
    /// The length of suitable lane needed before a spot is placed, in m.
    pub plan_distance: f64,
    /// The standoff from the stop point, in m.
    pub stop_distance: f64,
    /// The longitudinal margin around a parking spot, in m.
    pub longitudinal_buffer: f64,
    /// The distance between lane checks, in m.
    pub check_step: f64,
}

impl Default for PullOverConfig {
    fn default() -> Self {
        Self {
            operation_length: 30.0,
            buffer_to_boundary: 0.5,
            max_check_distance: 60.0,
            plan_distance: 35.0,
            stop_distance: 0.5,
            longitudinal_buffer: PARKING_SPOT_LONGITUDINAL_BUFFER,
            check_step: CHECK_STEP,
        }
    }
}

impl PullOverConfig {
    /// Parses a configuration from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every distance is finite, and that the search makes progress
    /// and ends within [MAX_CHECK_ITERATIONS] checks.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("operation_length", self.operation_length),
            ("buffer_to_boundary", self.buffer_to_boundary),
            ("max_check_distance", self.max_check_distance),
            ("plan_distance", self.plan_distance),
            ("stop_distance", self.stop_distance),
            ("longitudinal_buffer", self.longitudinal_buffer),
            ("check_step", self.check_step),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanningError::InvalidConfig(format!(
                    "{name} must be a non-negative distance, got {value}"
                )));
            }
        }
        if self.check_step <= 0.0 {
            return Err(PlanningError::InvalidConfig(
                "check_step must be positive".into(),
            ));
        }
        if self.max_check_distance / self.check_step > MAX_CHECK_ITERATIONS {
            return Err(PlanningError::InvalidConfig(format!(
                "max_check_distance {} needs more than {} checks of {} m",
                self.max_check_distance, MAX_CHECK_ITERATIONS, self.check_step
            )));
        }
        Ok(())
    }
}

/// The dimensions of the ego vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    /// The vehicle width in m.
    pub width: f64,
    /// The vehicle length in m.
    pub length: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            width: 2.11,
            length: 4.93,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            PullOverConfig::from_json(r#"{ "plan_distance": 20.0, "max_check_distance": 80.0 }"#)
                .unwrap();
        assert_eq!(config.plan_distance, 20.0);
        assert_eq!(config.max_check_distance, 80.0);
        assert_eq!(config.check_step, CHECK_STEP);
        assert_eq!(config.longitudinal_buffer, PARKING_SPOT_LONGITUDINAL_BUFFER);
    }

    #[test]
    fn rejects_non_positive_step() {
        let err = PullOverConfig::from_json(r#"{ "check_step": 0.0 }"#).unwrap_err();
        assert!(matches!(err, PlanningError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unbounded_search() {
        for json in [
            r#"{ "max_check_distance": 1e300 }"#,
            r#"{ "check_step": 1e-12 }"#,
        ] {
            let err = PullOverConfig::from_json(json).unwrap_err();
            assert!(matches!(err, PlanningError::InvalidConfig(_)));
        }

        let longest = PullOverConfig {
            max_check_distance: MAX_CHECK_ITERATIONS * CHECK_STEP,
            ..Default::default()
        };
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PullOverConfig::from_json("{ plan_distance: }").unwrap_err();
        assert!(matches!(err, PlanningError::Json(_)));
    }
}
