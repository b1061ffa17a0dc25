//! Server-side view of worlds and online players

use crate::error::CollaboratorError;
use crate::world::World;
use glam::DVec3;

/// Handle of a world loaded on the game server.
///
/// Players report the server world they stand in; the scheduler compares
/// these handles to decide whether a player is in a map's world.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ServerWorldId(pub u64);

/// An online player.
pub trait Player {
    fn world(&self) -> ServerWorldId;

    /// Position in block units (x, y, z); y is vertical.
    fn position(&self) -> DVec3;
}

/// The game server the scheduler polls for player positions.
///
/// Calls are expected to be fast, in-process lookups.
pub trait Server {
    /// All currently online players, in any order.
    fn online_players(&self) -> Result<Vec<&dyn Player>, CollaboratorError>;

    /// Server-side handle for a world, or `None` if the server has no such
    /// world loaded.
    fn server_world(&self, world: &dyn World) -> Result<Option<ServerWorldId>, CollaboratorError>;
}
