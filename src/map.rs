use crate::{LaneId, LaneSet};
use serde::{Deserialize, Serialize};

/// Lane lookups made by the pull over engine.
pub trait LaneMap {
    /// Gets the lane with the given ID, if it exists.
    fn lane(&self, id: LaneId) -> Option<&Lane>;
}

/// The manoeuvre a lane is intended for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneTurn {
    #[default]
    NoTurn,
    LeftTurn,
    RightTurn,
    UTurn,
}

/// The kind of traffic a lane carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneType {
    None,
    #[default]
    CityDriving,
    Biking,
    Sidewalk,
    Parking,
}

/// A single lane of a road.
#[derive(Clone, Debug)]
pub struct Lane {
    /// The lane ID.
    id: LaneId,
    /// The turn type.
    turn: LaneTurn,
    /// The lane type.
    lane_type: LaneType,
    /// The lanes immediately to the right, travelling in the same direction.
    right_neighbors: Vec<LaneId>,
}

/// The attributes of a lane.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct LaneAttributes {
    pub turn: LaneTurn,
    pub lane_type: LaneType,
}

impl Lane {
    pub(crate) fn new(id: LaneId, attribs: &LaneAttributes) -> Self {
        Self {
            id,
            turn: attribs.turn,
            lane_type: attribs.lane_type,
            right_neighbors: vec![],
        }
    }

    pub fn id(&self) -> LaneId {
        self.id
    }

    pub fn turn(&self) -> LaneTurn {
        self.turn
    }

    pub fn lane_type(&self) -> LaneType {
        self.lane_type
    }

    /// The forward lanes immediately to the right of this one.
    pub fn right_neighbors(&self) -> &[LaneId] {
        &self.right_neighbors
    }
}

/// An in-memory lane map.
#[derive(Default)]
pub struct HdMap {
    lanes: LaneSet,
}

impl HdMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a lane to the map.
    pub fn add_lane(&mut self, attribs: &LaneAttributes) -> LaneId {
        self.lanes.insert_with_key(|id| Lane::new(id, attribs))
    }

    /// Removes a lane. Lanes referring to it as a neighbour keep the stale ID.
    pub fn remove_lane(&mut self, id: LaneId) -> Option<Lane> {
        self.lanes.remove(id)
    }

    /// Specifies that `neighbor` lies immediately to the right of `lane`.
    pub fn add_right_neighbor(&mut self, lane: LaneId, neighbor: LaneId) {
        if let Some(lane) = self.lanes.get_mut(lane) {
            lane.right_neighbors.push(neighbor);
        }
    }

    /// Returns an iterator over all the lanes in the map.
    pub fn iter_lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }
}

impl LaneMap for HdMap {
    fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(id)
    }
}
