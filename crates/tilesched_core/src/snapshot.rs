//! In-memory collaborators over fixed data
//!
//! Worlds, maps, players and a server whose state is whatever it was built
//! with. Used to drive the scheduler from a JSON [`Scenario`] and as test
//! fixtures.

use crate::error::{CollaboratorError, ScenarioError};
use crate::grid::Grid;
use crate::region::RegionCoord;
use crate::server::{Player, Server, ServerWorldId};
use crate::settings::GridSettings;
use crate::task::{RenderTask, TaskRef};
use crate::world::{MapId, TileMap, World, WorldId};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// World with a fixed grid, or none at all (grid lookups then fail).
#[derive(Debug, Clone)]
pub struct SnapshotWorld {
    id: WorldId,
    grid: Option<Grid>,
}

impl SnapshotWorld {
    /// World on the default 512-block grid.
    pub fn new(id: impl Into<WorldId>) -> Self {
        Self {
            id: id.into(),
            grid: Some(Grid::default()),
        }
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = None;
        self
    }
}

impl World for SnapshotWorld {
    fn id(&self) -> &WorldId {
        &self.id
    }

    fn region_grid(&self) -> Result<Grid, CollaboratorError> {
        self.grid.ok_or_else(|| CollaboratorError::GridUnavailable {
            world: self.id.clone(),
        })
    }
}

pub struct SnapshotMap {
    id: MapId,
    world: Arc<dyn World>,
}

impl SnapshotMap {
    pub fn new(id: impl Into<MapId>, world: Arc<dyn World>) -> Self {
        Self {
            id: id.into(),
            world,
        }
    }
}

impl TileMap for SnapshotMap {
    fn id(&self) -> &MapId {
        &self.id
    }

    fn world(&self) -> &dyn World {
        self.world.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotPlayer {
    pub name: String,
    pub world: ServerWorldId,
    pub position: DVec3,
}

impl Player for SnapshotPlayer {
    fn world(&self) -> ServerWorldId {
        self.world
    }

    fn position(&self) -> DVec3 {
        self.position
    }
}

/// Server with a fixed set of loaded worlds and online players.
#[derive(Debug, Default)]
pub struct SnapshotServer {
    worlds: HashMap<WorldId, ServerWorldId>,
    players: Vec<SnapshotPlayer>,
    player_lookup_failure: Option<String>,
}

impl SnapshotServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a world, returning its server handle. Loading twice returns the
    /// same handle.
    pub fn load_world(&mut self, id: impl Into<WorldId>) -> ServerWorldId {
        let next = ServerWorldId(self.worlds.len() as u64 + 1);
        *self.worlds.entry(id.into()).or_insert(next)
    }

    pub fn add_player(&mut self, name: impl Into<String>, world: ServerWorldId, position: DVec3) {
        self.players.push(SnapshotPlayer {
            name: name.into(),
            world,
            position,
        });
    }

    pub fn clear_players(&mut self) {
        self.players.clear();
    }

    pub fn players(&self) -> &[SnapshotPlayer] {
        &self.players
    }

    /// Make every later player lookup fail with `reason`.
    pub fn fail_player_lookup(&mut self, reason: impl Into<String>) {
        self.player_lookup_failure = Some(reason.into());
    }
}

impl Server for SnapshotServer {
    fn online_players(&self) -> Result<Vec<&dyn Player>, CollaboratorError> {
        if let Some(reason) = &self.player_lookup_failure {
            return Err(CollaboratorError::PlayerLookup {
                reason: reason.clone(),
            });
        }
        Ok(self.players.iter().map(|p| p as &dyn Player).collect())
    }

    fn server_world(&self, world: &dyn World) -> Result<Option<ServerWorldId>, CollaboratorError> {
        Ok(self.worlds.get(world.id()).copied())
    }
}

// ============================================================================
// Scenario files
// ============================================================================

/// Worlds, maps, players and tasks, as read from JSON.
///
/// ```json
/// {
///   "worlds":  [{ "id": "overworld" }, { "id": "nether", "loaded": false }],
///   "maps":    [{ "id": "world", "world": "overworld" }],
///   "players": [{ "name": "alex", "world": "overworld", "position": [10.0, 64.0, -3.5] }],
///   "tasks":   [{ "type": "map", "map": "world", "region": { "x": 0, "z": 0 } },
///               { "type": "combined", "tasks": [] }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub worlds: Vec<WorldSpec>,
    pub maps: Vec<MapSpec>,
    pub players: Vec<PlayerSpec>,
    pub tasks: Vec<TaskSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSpec {
    pub id: WorldId,
    /// Whether the server has this world loaded.
    #[serde(default = "default_loaded")]
    pub loaded: bool,
    /// Own grid; the scenario default grid when absent.
    #[serde(default)]
    pub grid: Option<GridSettings>,
    /// Simulate a world whose grid cannot be resolved.
    #[serde(default)]
    pub grid_unavailable: bool,
}

fn default_loaded() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSpec {
    pub id: MapId,
    pub world: WorldId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub world: WorldId,
    pub position: DVec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskSpec {
    Map {
        map: MapId,
        #[serde(default)]
        region: Option<RegionCoord>,
    },
    Combined {
        #[serde(default)]
        tasks: Vec<TaskSpec>,
    },
}

/// Collaborators and tasks materialized from a [`Scenario`].
pub struct BuiltScenario {
    pub server: SnapshotServer,
    pub maps: HashMap<MapId, Arc<dyn TileMap>>,
    pub tasks: Vec<TaskRef>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build the collaborators; worlds without a grid of their own use
    /// `default_grid`.
    pub fn build(&self, default_grid: Grid) -> Result<BuiltScenario, ScenarioError> {
        let mut server = SnapshotServer::new();
        let mut worlds: HashMap<WorldId, Arc<dyn World>> = HashMap::new();
        let mut loaded: HashMap<WorldId, ServerWorldId> = HashMap::new();

        for spec in &self.worlds {
            let mut world = SnapshotWorld::new(spec.id.clone()).with_grid(default_grid);
            if let Some(grid) = &spec.grid {
                let grid = grid.to_grid().map_err(|source| ScenarioError::Grid {
                    world: spec.id.clone(),
                    source,
                })?;
                world = world.with_grid(grid);
            }
            if spec.grid_unavailable {
                world = world.without_grid();
            }
            if spec.loaded {
                loaded.insert(spec.id.clone(), server.load_world(spec.id.clone()));
            }
            worlds.insert(spec.id.clone(), Arc::new(world));
        }

        let mut maps: HashMap<MapId, Arc<dyn TileMap>> = HashMap::new();
        for spec in &self.maps {
            let world = worlds
                .get(&spec.world)
                .ok_or_else(|| ScenarioError::UnknownWorld(spec.world.clone()))?;
            maps.insert(
                spec.id.clone(),
                Arc::new(SnapshotMap::new(spec.id.clone(), world.clone())),
            );
        }

        for spec in &self.players {
            if !worlds.contains_key(&spec.world) {
                return Err(ScenarioError::UnknownWorld(spec.world.clone()));
            }
            let world = loaded.get(&spec.world).copied().ok_or_else(|| {
                ScenarioError::PlayerInUnloadedWorld {
                    player: spec.name.clone(),
                    world: spec.world.clone(),
                }
            })?;
            server.add_player(spec.name.clone(), world, spec.position);
        }

        let tasks = self
            .tasks
            .iter()
            .map(|spec| build_task(spec, &maps))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            worlds = worlds.len(),
            maps = maps.len(),
            players = server.players().len(),
            tasks = tasks.len(),
            "scenario built"
        );
        Ok(BuiltScenario {
            server,
            maps,
            tasks,
        })
    }
}

fn build_task(
    spec: &TaskSpec,
    maps: &HashMap<MapId, Arc<dyn TileMap>>,
) -> Result<TaskRef, ScenarioError> {
    match spec {
        TaskSpec::Map { map, region } => {
            let map = maps
                .get(map)
                .ok_or_else(|| ScenarioError::UnknownMap(map.clone()))?;
            Ok(RenderTask::map(map.clone(), *region))
        }
        TaskSpec::Combined { tasks } => {
            let children = tasks
                .iter()
                .map(|child| build_task(child, maps))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RenderTask::combined(children))
        }
    }
}
