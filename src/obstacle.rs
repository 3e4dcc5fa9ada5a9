use crate::decision::{LongitudinalDecision, StopDecision};
use crate::error::{PlanningError, Result};
use crate::reference_line::ReferencePath;
use crate::sl::Footprint;
use crate::{ObstacleId, ObstacleSet};
use log::debug;

/// The longitudinal extent of a virtual stop wall, in m.
const STOP_WALL_LENGTH: f64 = 0.1;

/// A sensed object or planning marker on the path.
#[derive(Clone, Debug)]
pub struct Obstacle {
    /// The obstacle ID.
    id: ObstacleId,
    /// A human readable name, used in diagnostics.
    name: String,
    /// Whether the obstacle is stationary.
    is_static: bool,
    /// Whether the obstacle encodes a planning constraint rather than a sensed object.
    is_virtual: bool,
    /// The extents of the obstacle relative to the path.
    sl_boundary: Footprint,
}

/// The attributes of an obstacle.
pub struct ObstacleAttributes<'a> {
    pub name: &'a str,
    pub is_static: bool,
    pub is_virtual: bool,
    pub sl_boundary: Footprint,
}

impl Obstacle {
    pub(crate) fn new(id: ObstacleId, attribs: &ObstacleAttributes) -> Self {
        Self {
            id,
            name: attribs.name.to_owned(),
            is_static: attribs.is_static,
            is_virtual: attribs.is_virtual,
            sl_boundary: attribs.sl_boundary,
        }
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    /// The extents of the obstacle relative to the path.
    pub fn sl_boundary(&self) -> &Footprint {
        &self.sl_boundary
    }
}

/// The obstacles on a reference path and the decisions made about them this cycle.
#[derive(Clone)]
pub struct PathDecision {
    /// The obstacles on the path.
    obstacles: ObstacleSet,
    /// The longitudinal decisions attached to obstacles.
    decisions: Vec<LongitudinalDecision>,
    /// The maximum number of obstacles that may be registered.
    capacity: usize,
}

impl Default for PathDecision {
    fn default() -> Self {
        Self::with_capacity(usize::MAX)
    }
}

impl PathDecision {
    /// Creates an empty registry with no limit on the number of obstacles.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an empty registry which holds at most `capacity` obstacles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            obstacles: ObstacleSet::default(),
            decisions: vec![],
            capacity,
        }
    }

    /// Adds an obstacle, or returns `None` if the registry is full.
    pub fn add_obstacle(&mut self, attribs: &ObstacleAttributes) -> Option<ObstacleId> {
        if self.obstacles.len() >= self.capacity {
            return None;
        }
        Some(self.obstacles.insert_with_key(|id| Obstacle::new(id, attribs)))
    }

    /// Removes an obstacle along with any decisions attached to it.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Obstacle> {
        self.decisions.retain(|d| d.obstacle_id != id);
        self.obstacles.remove(id)
    }

    /// Creates a virtual wall spanning the road at the given arc length.
    pub fn create_stop_obstacle(
        &mut self,
        path: &dyn ReferencePath,
        name: &str,
        s: f64,
    ) -> Result<ObstacleId> {
        if s < 0.0 || s > path.length() {
            debug!("stop wall[{}] s[{}] is off the path", name, s);
            return Err(PlanningError::ObstacleCreation { id: name.into() });
        }
        let width = path.road_width(s);
        self.add_obstacle(&ObstacleAttributes {
            name,
            is_static: true,
            is_virtual: true,
            sl_boundary: Footprint::new(s, s + STOP_WALL_LENGTH, -width.right, width.left),
        })
        .ok_or_else(|| PlanningError::ObstacleCreation { id: name.into() })
    }

    /// Attaches a stop decision to an obstacle on behalf of the rule named `tag`.
    pub fn add_longitudinal_decision(
        &mut self,
        tag: &str,
        obstacle_id: ObstacleId,
        decision: StopDecision,
    ) -> Result<()> {
        if !self.obstacles.contains_key(obstacle_id) {
            return Err(PlanningError::UnknownObstacle(obstacle_id));
        }
        self.decisions.push(LongitudinalDecision {
            tag: tag.into(),
            obstacle_id,
            decision,
        });
        Ok(())
    }

    /// Gets the obstacle with the given ID.
    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    /// Returns an iterator over all the obstacles on the path.
    pub fn iter_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    /// The longitudinal decisions made so far, in the order they were made.
    pub fn decisions(&self) -> &[LongitudinalDecision] {
        &self.decisions
    }
}
