//! Worlds and maps as seen by the scheduler
//!
//! Both are external collaborators: the scheduler only needs identities and
//! the region grid a world is partitioned with.

use crate::error::CollaboratorError;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a world (a dimension / save the maps render from).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub String);

/// Identifier of a rendered map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub String);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorldId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<&str> for MapId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for WorldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<String> for MapId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A world whose blocks a map renders.
pub trait World: Send + Sync {
    fn id(&self) -> &WorldId;

    /// Region grid the world's files are partitioned with.
    fn region_grid(&self) -> Result<Grid, CollaboratorError>;
}

/// A rendered map, bound to exactly one world.
pub trait TileMap: Send + Sync {
    fn id(&self) -> &MapId;

    fn world(&self) -> &dyn World;
}
