use super::{PullOver, StopPoint, PULL_OVER_VO_ID_PREFIX};
use crate::decision::{StopDecision, StopReasonCode};
use crate::error::{PlanningError, Result};
use crate::math::Point2d;
use crate::planning_state::CommittedStop;
use crate::sl::SlPoint;
use crate::traffic_rule::{Frame, TrafficRule};
use crate::ObstacleId;
use log::{error, info};

impl PullOver {
    /// Asks the vehicle to stop at a roadside stop point, and records the
    /// stop point so later cycles can reuse it.
    pub(crate) fn build_pull_over_stop(&self, frame: &mut Frame, stop: StopPoint) -> Result<()> {
        let path = frame.reference_line;
        let heading = path.heading(stop.sl.s);

        let start_sl = SlPoint::new(stop.sl.s - self.config.operation_length, 0.0);
        let start_point = path.sl_to_xy(start_sl).ok_or(PlanningError::Projection {
            s: start_sl.s,
            l: start_sl.l,
        })?;

        self.build_stop_decision(frame, stop.sl.s, stop.point, heading)?;

        frame.planning_state.commit_pull_over(CommittedStop {
            start_point,
            stop_point: stop.point,
            stop_heading: heading,
        });
        info!(
            "pull over stop committed at s[{}] l[{}] heading[{}]",
            stop.sl.s, stop.sl.l, heading
        );
        Ok(())
    }

    /// Asks the vehicle to stop in its lane short of `anchor_s`, and forgets any
    /// committed stop point. Returns the arc length of the stop line.
    /// The stop is pulled back onto the path if `anchor_s` lies beyond either end.
    pub(crate) fn build_in_lane_stop(&self, frame: &mut Frame, anchor_s: f64) -> Result<f64> {
        let path = frame.reference_line;
        let anchor_s = anchor_s.clamp(0.0, path.length());
        let stop_point = path
            .sl_to_xy(SlPoint::new(anchor_s, 0.0))
            .ok_or(PlanningError::Projection { s: anchor_s, l: 0.0 })?;
        let stop_line_s = f64::max(anchor_s - self.config.stop_distance, 0.0);
        let heading = path.heading(anchor_s);

        self.build_stop_decision(frame, stop_line_s, stop_point, heading)?;

        frame.planning_state.clear_pull_over_points();
        info!("in lane stop at s[{}]", stop_line_s);
        Ok(stop_line_s)
    }

    /// Places a virtual wall at `stop_line_s` and attaches a stop decision to it.
    /// Either both are added to the path or neither is.
    fn build_stop_decision(
        &self,
        frame: &mut Frame,
        stop_line_s: f64,
        stop_point: Point2d,
        stop_heading: f64,
    ) -> Result<ObstacleId> {
        let path = frame.reference_line;
        if stop_line_s < 0.0 || stop_line_s > path.length() {
            return Err(PlanningError::StopLineOutOfBounds {
                s: stop_line_s,
                length: path.length(),
            });
        }

        let reason = frame.planning_state.pull_over_reason().unwrap_or_default();
        let wall_name = format!("{}{}", PULL_OVER_VO_ID_PREFIX, reason.name());
        let wall_id = frame
            .path_decision
            .create_stop_obstacle(path, &wall_name, stop_line_s)
            .map_err(|err| {
                error!("Failed to create obstacle[{}]", wall_name);
                err
            })?;

        let stop = StopDecision {
            reason_code: StopReasonCode::PullOver,
            distance_s: -self.config.stop_distance,
            stop_heading,
            stop_point,
        };
        if let Err(err) = frame
            .path_decision
            .add_longitudinal_decision(self.name(), wall_id, stop)
        {
            error!("Failed to add decision for {}: {}", wall_name, err);
            frame.path_decision.remove_obstacle(wall_id);
            return Err(err);
        }

        Ok(wall_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{PullOverConfig, VehicleParams};
    use crate::map::HdMap;
    use crate::math::LineSegment2d;
    use crate::obstacle::PathDecision;
    use crate::planning_state::{PlanningState, PullOverReason};
    use crate::reference_line::{ReferenceLine, ReferenceLineAttributes, RoadWidth};
    use crate::sl::Footprint;
    use assert_approx_eq::assert_approx_eq;

    fn road() -> ReferenceLine {
        let line = LineSegment2d::from_ends(Point2d::new(0.0, 0.0), Point2d::new(200.0, 0.0));
        ReferenceLine::new(&ReferenceLineAttributes {
            curve: &line,
            road_width: &|_| RoadWidth {
                left: 1.75,
                right: 3.5,
            },
        })
    }

    fn frame<'a>(
        path: &'a ReferenceLine,
        map: &'a HdMap,
        obstacles: &'a mut PathDecision,
        state: &'a mut PlanningState,
    ) -> Frame<'a> {
        Frame {
            reference_line: path,
            map,
            path_decision: obstacles,
            planning_state: state,
            adc_sl_boundary: Footprint::new(95.0, 100.0, -1.0, 1.0),
            vehicle: VehicleParams {
                width: 2.0,
                length: 5.0,
            },
        }
    }

    fn pulling_over() -> PlanningState {
        let mut state = PlanningState::new();
        state.set_pull_over(true, PullOverReason::Destination);
        state
    }

    #[test]
    fn pull_over_stop_is_recorded() {
        let path = road();
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let mut state = pulling_over();
        let rule = PullOver::new(PullOverConfig::default()).unwrap();
        let stop = StopPoint {
            sl: SlPoint::new(150.0, -2.0),
            point: Point2d::new(150.0, -2.0),
        };

        let mut frame = frame(&path, &map, &mut obstacles, &mut state);
        rule.build_pull_over_stop(&mut frame, stop).unwrap();

        let committed = state.committed_stop().unwrap();
        assert_approx_eq!(committed.start_point.x, 120.0, 0.001);
        assert_approx_eq!(committed.start_point.y, 0.0, 0.001);
        assert_eq!(committed.stop_point, stop.point);

        let decision = &obstacles.decisions()[0];
        assert_eq!(decision.tag, "PULL_OVER");
        assert_eq!(decision.decision.distance_s, -0.5);
        let wall = obstacles.obstacle(decision.obstacle_id).unwrap();
        assert_eq!(wall.name(), "PO_DESTINATION");
        assert_eq!(wall.sl_boundary().start_s(), 150.0);
    }

    #[test]
    fn in_lane_stop_is_set_back() {
        let path = road();
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let mut state = pulling_over();
        state.commit_pull_over(CommittedStop {
            start_point: Point2d::new(120.0, 0.0),
            stop_point: Point2d::new(150.0, -2.0),
            stop_heading: 0.0,
        });
        let rule = PullOver::new(PullOverConfig::default()).unwrap();

        let mut frame = frame(&path, &map, &mut obstacles, &mut state);
        let stop_line_s = rule.build_in_lane_stop(&mut frame, 140.0).unwrap();
        assert_eq!(stop_line_s, 139.5);

        assert!(state.committed_stop().is_none());
        assert!(state.is_pull_over());
        let decision = &obstacles.decisions()[0].decision;
        assert_approx_eq!(decision.stop_point.x, 140.0, 0.001);
        assert_approx_eq!(decision.stop_point.y, 0.0, 0.001);
    }

    #[test]
    fn failed_wall_leaves_state_untouched() {
        let path = road();
        let map = HdMap::new();
        let mut obstacles = PathDecision::with_capacity(0);
        let mut state = pulling_over();
        let committed = CommittedStop {
            start_point: Point2d::new(120.0, 0.0),
            stop_point: Point2d::new(150.0, -2.0),
            stop_heading: 0.0,
        };
        state.commit_pull_over(committed);
        let rule = PullOver::new(PullOverConfig::default()).unwrap();

        let mut frame = frame(&path, &map, &mut obstacles, &mut state);
        let err = rule.build_in_lane_stop(&mut frame, 140.0).unwrap_err();
        assert!(matches!(err, PlanningError::ObstacleCreation { .. }));
        assert_eq!(state.committed_stop(), Some(committed));
        assert!(obstacles.decisions().is_empty());
    }

    #[test]
    fn in_lane_stop_is_kept_on_path() {
        let path = road();
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let mut state = pulling_over();
        let rule = PullOver::new(PullOverConfig::default()).unwrap();

        let mut frame = frame(&path, &map, &mut obstacles, &mut state);
        let stop_line_s = rule.build_in_lane_stop(&mut frame, 250.0).unwrap();
        assert_approx_eq!(stop_line_s, 199.5, 0.001);
        assert_eq!(rule.build_in_lane_stop(&mut frame, -10.0).unwrap(), 0.0);
        assert_eq!(obstacles.decisions().len(), 2);
        let decision = &obstacles.decisions()[0].decision;
        assert_approx_eq!(decision.stop_point.x, 200.0, 0.001);
    }

    #[test]
    fn stop_line_off_path_is_rejected() {
        let path = road();
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let mut state = pulling_over();
        let rule = PullOver::new(PullOverConfig::default()).unwrap();

        let mut frame = frame(&path, &map, &mut obstacles, &mut state);
        let err = rule
            .build_stop_decision(&mut frame, 250.0, Point2d::new(250.0, 0.0), 0.0)
            .unwrap_err();
        assert!(matches!(err, PlanningError::StopLineOutOfBounds { .. }));
        assert_eq!(obstacles.iter_obstacles().count(), 0);
    }
}
