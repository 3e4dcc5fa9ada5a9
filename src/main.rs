use std::time::Instant;

use log::info;
use pull_over::{
    math::{LineSegment2d, Point2d},
    Footprint, Frame, HdMap, LaneAttributes, ObstacleAttributes, OverlapKind, PathDecision,
    PlanningState, PullOver, PullOverConfig, PullOverReason, ReferenceLine,
    ReferenceLineAttributes, RoadWidth, TrafficDecider, VehicleParams,
};

fn main() {
    env_logger::init();

    let line = LineSegment2d::from_ends(Point2d::new(0.0, 0.0), Point2d::new(500.0, 0.0));
    let mut path = ReferenceLine::new(&ReferenceLineAttributes {
        curve: &line,
        road_width: &|_| RoadWidth {
            left: 1.75,
            right: 3.5,
        },
    });
    let mut map = HdMap::new();
    let lane = map.add_lane(&LaneAttributes::default());
    path.add_lane_segment(lane, 0.0, 500.0);
    path.add_overlap(OverlapKind::Crosswalk, 115.0, 120.0);

    let mut obstacles = PathDecision::new();
    for i in 0..20 {
        let s = 150.0 + 12.0 * i as f64;
        obstacles.add_obstacle(&ObstacleAttributes {
            name: "parked car",
            is_static: true,
            is_virtual: false,
            sl_boundary: Footprint::new(s, s + 4.5, -3.2, -1.4),
        });
    }

    let config = match PullOverConfig::from_json(r#"{ "max_check_distance": 300.0 }"#) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    let rule = match PullOver::new(config) {
        Ok(rule) => rule,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    let mut decider = TrafficDecider::new();
    decider.add_rule(rule);

    let mut state = PlanningState::new();
    state.set_pull_over(true, PullOverReason::Destination);

    println!("Planning...");
    const NUM_CYCLES: u32 = 1000;
    let start = Instant::now();
    for _ in 0..NUM_CYCLES {
        let mut decisions = obstacles.clone();
        let mut frame = Frame {
            reference_line: &path,
            map: &map,
            path_decision: &mut decisions,
            planning_state: &mut state,
            adc_sl_boundary: Footprint::new(95.0, 100.0, -1.0, 1.0),
            vehicle: VehicleParams::default(),
        };
        decider.execute(&mut frame);
    }
    let cycle = start.elapsed() / NUM_CYCLES;
    info!("final state: {:?}", state.pull_over());
    println!("Avg. cycle: {:?} --> {:?}", cycle, state.committed_stop());
}
