use crate::ObstacleId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("Stop line s[{s}] is outside the reference line [0, {length}]")]
    StopLineOutOfBounds { s: f64, length: f64 },

    #[error("Failed to project s[{s}] l[{l}] onto the reference line")]
    Projection { s: f64, l: f64 },

    #[error("Failed to create obstacle[{id}]")]
    ObstacleCreation { id: String },

    #[error("Obstacle {0:?} is not on the path")]
    UnknownObstacle(ObstacleId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanningError>;
