//! Render task prioritisation.
//!
//! Tasks touching fewer regions go first; among equals, tasks closer to an
//! online player go first. The pieces, leaf first:
//!
//! - [`collect_regions`] flattens a task tree into its distinct regions.
//! - [`PlayerRegionIndex`] snapshots the region cells players occupy, per map.
//! - [`min_squared_distance`] scans task regions against player regions.
//! - [`PriorityCache`] remembers each task's [`TaskPriority`] by identity.
//! - [`PriorityComparator`] ties them together into an [`Ordering`].
//!
//! [`Ordering`]: std::cmp::Ordering

mod cache;
mod collector;
mod comparator;
mod distance;
mod player_regions;

pub use cache::PriorityCache;
pub use collector::collect_regions;
pub use comparator::{sort_by_priority, PriorityComparator};
pub use distance::min_squared_distance;
pub use player_regions::PlayerRegionIndex;

use std::fmt;

/// Squared region-grid distance from a task to the nearest player.
///
/// `Infinite` when there is nothing to measure (no regions, no players, no
/// server, or the task spans several maps) and orders after every finite
/// distance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerDistance {
    Finite(u64),
    Infinite,
}

impl PlayerDistance {
    pub fn is_finite(self) -> bool {
        matches!(self, PlayerDistance::Finite(_))
    }
}

impl fmt::Display for PlayerDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerDistance::Finite(d) => write!(f, "{d}"),
            PlayerDistance::Infinite => f.write_str("inf"),
        }
    }
}

/// Derived scheduling priority of a task; lower sorts first.
///
/// Field order is the comparison order: region count, then distance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskPriority {
    pub region_count: usize,
    pub distance: PlayerDistance,
}

impl TaskPriority {
    pub const fn new(region_count: usize, distance: PlayerDistance) -> Self {
        Self {
            region_count,
            distance,
        }
    }
}
