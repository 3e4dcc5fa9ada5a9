use super::{PullOver, StopPoint};
use crate::config::VehicleParams;
use crate::debug::{debug_footprint, debug_point};
use crate::sl::{Footprint, SlPoint};
use crate::traffic_rule::Frame;
use log::debug;

impl PullOver {
    /// Places a parking spot ending at `stop_s`, as far right as the road allows,
    /// and returns its stop point if the spot is clear.
    pub(crate) fn find_pull_over_stop_at(&self, frame: &Frame, stop_s: f64) -> Option<StopPoint> {
        let path = frame.reference_line;
        if stop_s < 0.0 || stop_s > path.length() {
            return None;
        }

        let vehicle = &frame.vehicle;
        let buffer = self.config.longitudinal_buffer;

        // The spot is only usable if the road is wide enough along its whole length
        let road_right_width = [
            stop_s + buffer,
            stop_s - 0.5 * vehicle.length,
            stop_s - vehicle.length - buffer,
        ]
        .into_iter()
        .map(|s| path.road_width(s).right)
        .fold(f64::INFINITY, f64::min);

        let stop = SlPoint::new(
            stop_s,
            -(road_right_width - 0.5 * vehicle.width - self.config.buffer_to_boundary),
        );

        if !self.is_valid_stop(frame, stop) {
            return None;
        }

        let point = path.sl_to_xy(stop)?;
        debug!("stop_point: s[{}] l[{}] ({}, {})", stop.s, stop.l, point.x, point.y);
        debug_point("pull over stop", stop);
        Some(StopPoint { sl: stop, point })
    }

    /// Checks that a stop point is on the path, far enough ahead of the vehicle,
    /// and that its parking spot is clear of static obstacles.
    pub(crate) fn is_valid_stop(&self, frame: &Frame, stop: SlPoint) -> bool {
        let path = frame.reference_line;
        if stop.s < 0.0 || stop.s > path.length() {
            return false;
        }

        if stop.s - frame.adc_front_edge_s() < self.config.operation_length {
            return false;
        }

        let spot = self.parking_spot(&frame.vehicle, stop);
        debug!("parking_spot_boundary: {:?}", spot);
        debug_footprint("parking spot", &spot);

        for obstacle in frame.path_decision.iter_obstacles() {
            if obstacle.is_virtual() || !obstacle.is_static() {
                debug!("obstacle[{}] VIRTUAL or NOT STATIC. SKIP", obstacle.name());
                continue;
            }
            if spot.overlaps(obstacle.sl_boundary()) {
                debug!(
                    "obstacle[{}] overlaps with parking spot: {:?}",
                    obstacle.name(),
                    obstacle.sl_boundary()
                );
                return false;
            }
        }

        true
    }

    /// The region the vehicle occupies when stopped at `stop`, plus margins.
    /// The lateral margin is only added on the road edge side.
    pub(crate) fn parking_spot(&self, vehicle: &VehicleParams, stop: SlPoint) -> Footprint {
        let buffer = self.config.longitudinal_buffer;
        Footprint::new(
            stop.s - vehicle.length - buffer,
            stop.s + buffer,
            stop.l - 0.5 * vehicle.width - self.config.buffer_to_boundary,
            stop.l + 0.5 * vehicle.width,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::PullOverConfig;
    use crate::map::HdMap;
    use crate::math::{LineSegment2d, Point2d};
    use crate::obstacle::{ObstacleAttributes, PathDecision};
    use crate::planning_state::PlanningState;
    use crate::reference_line::{ReferenceLine, ReferenceLineAttributes, RoadWidth};
    use assert_approx_eq::assert_approx_eq;

    const VEHICLE: VehicleParams = VehicleParams {
        width: 2.0,
        length: 5.0,
    };

    fn rule() -> PullOver {
        PullOver::new(PullOverConfig {
            operation_length: 30.0,
            buffer_to_boundary: 0.5,
            ..Default::default()
        })
        .unwrap()
    }

    /// A straight road whose right side narrows to `narrow` over `[130, 136)`.
    fn road(narrow: f64) -> ReferenceLine {
        let line = LineSegment2d::from_ends(Point2d::new(0.0, 0.0), Point2d::new(300.0, 0.0));
        ReferenceLine::new(&ReferenceLineAttributes {
            curve: &line,
            road_width: &move |s| RoadWidth {
                left: 1.75,
                right: if (130.0..136.0).contains(&s) { narrow } else { 3.5 },
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
            vehicle: VEHICLE,
        }
    }

    #[test]
    fn spot_hugs_road_edge() {
        let path = road(3.5);
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let mut state = PlanningState::new();
        let frame = frame(&path, &map, &mut obstacles, &mut state);

        let stop = rule().find_pull_over_stop_at(&frame, 150.0).unwrap();
        assert_eq!(stop.sl.s, 150.0);
        assert_approx_eq!(stop.sl.l, -2.0);
        assert_approx_eq!(stop.point.x, 150.0, 0.001);
        assert_approx_eq!(stop.point.y, -2.0, 0.001);

        let spot = rule().parking_spot(&VEHICLE, stop.sl);
        assert_approx_eq!(spot.start_s(), 144.0);
        assert_approx_eq!(spot.end_s(), 151.0);
        assert_approx_eq!(spot.start_l(), -3.5);
        assert_approx_eq!(spot.end_l(), -1.0);
    }

    #[test]
    fn narrowest_width_along_spot_is_used() {
        let path = road(2.5);
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let mut state = PlanningState::new();
        let frame = frame(&path, &map, &mut obstacles, &mut state);

        // The rear edge of a spot ending at 138 falls in the narrow section
        let stop = rule().find_pull_over_stop_at(&frame, 138.0).unwrap();
        assert_approx_eq!(stop.sl.l, -1.0);
    }

    #[test]
    fn spot_too_close_to_vehicle_is_rejected() {
        let path = road(3.5);
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let mut state = PlanningState::new();
        let frame = frame(&path, &map, &mut obstacles, &mut state);

        assert!(rule().find_pull_over_stop_at(&frame, 125.0).is_none());
        assert!(rule().find_pull_over_stop_at(&frame, 130.0).is_some());
        assert!(rule().find_pull_over_stop_at(&frame, -5.0).is_none());
        assert!(rule().find_pull_over_stop_at(&frame, 400.0).is_none());
    }

    #[test]
    fn only_static_physical_obstacles_block_spot() {
        let path = road(3.5);
        let map = HdMap::new();
        let mut obstacles = PathDecision::new();
        let in_spot = Footprint::new(146.0, 149.0, -3.0, -2.0);
        for (name, is_static, is_virtual) in [("moving", false, false), ("wall", true, true)] {
            obstacles.add_obstacle(&ObstacleAttributes {
                name,
                is_static,
                is_virtual,
                sl_boundary: in_spot,
            });
        }
        let mut state = PlanningState::new();
        {
            let frame = frame(&path, &map, &mut obstacles, &mut state);
            assert!(rule().is_valid_stop(&frame, SlPoint::new(150.0, -2.0)));
        }

        obstacles.add_obstacle(&ObstacleAttributes {
            name: "parked car",
            is_static: true,
            is_virtual: false,
            sl_boundary: in_spot,
        });
        let frame = frame(&path, &map, &mut obstacles, &mut state);
        assert!(!rule().is_valid_stop(&frame, SlPoint::new(150.0, -2.0)));
        // A spot further ahead is clear of the parked car
        assert!(rule().is_valid_stop(&frame, SlPoint::new(160.0, -2.0)));
    }
}
