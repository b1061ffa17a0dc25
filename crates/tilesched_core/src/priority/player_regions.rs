//! Region cells occupied by online players, snapshotted per map.

use crate::error::CollaboratorError;
use crate::math::block_xz;
use crate::region::RegionCoord;
use crate::server::Server;
use crate::world::{MapId, TileMap};
use std::collections::HashMap;
use tilesched_metrics::{metrics, Counter};

/// Lazily computed, never refreshed: the first lookup for a map polls the
/// server, every later lookup for that map returns the same snapshot. All
/// comparisons made through one index therefore see consistent player
/// positions, even if players move meanwhile.
pub struct PlayerRegionIndex<'a> {
    server: Option<&'a dyn Server>,
    by_map: HashMap<MapId, Vec<RegionCoord>>,
    counters: Counter,
}

impl<'a> PlayerRegionIndex<'a> {
    pub fn new(server: Option<&'a dyn Server>) -> Self {
        Self {
            server,
            by_map: HashMap::new(),
            counters: Counter::new(),
        }
    }

    pub fn has_server(&self) -> bool {
        self.server.is_some()
    }

    /// Region cell of every online player standing in `map`'s world.
    ///
    /// Empty without a server, when the server has no such world loaded,
    /// or when any collaborator lookup fails.
    pub fn regions_for(&mut self, map: &dyn TileMap) -> &[RegionCoord] {
        if !self.by_map.contains_key(map.id()) {
            let regions = self.snapshot(map);
            self.by_map.insert(map.id().clone(), regions);
        }
        self.by_map.get(map.id()).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of maps snapshotted so far.
    pub fn len(&self) -> usize {
        self.by_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_map.is_empty()
    }

    pub fn counters(&self) -> &Counter {
        &self.counters
    }

    fn snapshot(&mut self, map: &dyn TileMap) -> Vec<RegionCoord> {
        let Some(server) = self.server else {
            return Vec::new();
        };

        metrics!(self.counters.increment("players.snapshot"));
        match player_regions(server, map) {
            Ok(regions) => {
                tracing::debug!(
                    map = %map.id(),
                    players = regions.len(),
                    "player region snapshot taken"
                );
                regions
            }
            Err(err) => {
                metrics!(self.counters.increment("players.snapshot_failed"));
                tracing::warn!(
                    map = %map.id(),
                    error = %err,
                    "no player information for map, distance ordering disabled for it"
                );
                Vec::new()
            }
        }
    }
}

fn player_regions(
    server: &dyn Server,
    map: &dyn TileMap,
) -> Result<Vec<RegionCoord>, CollaboratorError> {
    let world = map.world();
    let grid = world.region_grid()?;
    let Some(server_world) = server.server_world(world)? else {
        return Ok(Vec::new());
    };

    Ok(server
        .online_players()?
        .into_iter()
        .filter(|player| player.world() == server_world)
        .map(|player| grid.cell(block_xz(player.position())))
        .collect())
}
