//! Tilesched Core
//!
//! Orders pending render tasks for a tile-rendering scheduler:
//! - Region coordinates and the world region grid
//! - Collaborator traits for worlds, maps, the game server and its players
//! - The render task tree
//! - Task prioritisation (region count, then distance to online players)
//! - Settings and in-memory snapshot collaborators

pub mod error;
pub mod grid;
pub mod math;
pub mod priority;
pub mod region;
pub mod server;
pub mod settings;
pub mod snapshot;
pub mod task;
pub mod world;

pub use glam;

pub use error::{CollaboratorError, GridError, ScenarioError, SettingsError, TaskTreeError};
pub use grid::Grid;
pub use priority::{sort_by_priority, PlayerDistance, PriorityComparator, TaskPriority};
pub use region::RegionCoord;
pub use server::{Player, Server, ServerWorldId};
pub use settings::SchedulerSettings;
pub use task::{RenderTask, TaskId, TaskRef};
pub use world::{MapId, TileMap, World, WorldId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
