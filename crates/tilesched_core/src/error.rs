//! Error types shared across the scheduler core

use crate::world::{MapId, WorldId};
use thiserror::Error;

/// Failures reported by world, server and player collaborators.
///
/// The priority comparator never surfaces these; they are downgraded to
/// "no player information" at the point of use.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("region grid for world '{world}' is unavailable")]
    GridUnavailable { world: WorldId },

    #[error("online player lookup failed: {reason}")]
    PlayerLookup { reason: String },
}

/// Errors raised while validating a task tree before it is ordered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTreeError {
    #[error("task tree nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Invalid region grid geometry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("region grid cell size must be positive, got {x}x{z}")]
    NonPositiveCellSize { x: i32, z: i32 },
}

/// Errors that can occur while loading scheduler settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("settings are not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("invalid region grid in settings")]
    Grid(#[from] GridError),
}

/// Errors that can occur while materializing a snapshot scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario references unknown world '{0}'")]
    UnknownWorld(WorldId),

    #[error("scenario references unknown map '{0}'")]
    UnknownMap(MapId),

    #[error("player '{player}' is in world '{world}', which is not loaded")]
    PlayerInUnloadedWorld { player: String, world: WorldId },

    #[error("invalid region grid for world '{world}'")]
    Grid {
        world: WorldId,
        #[source]
        source: GridError,
    },

    #[error("scenario is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read scenario file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
