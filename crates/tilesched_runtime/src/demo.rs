//! Built-in scenario used when no scenario file is given

use tilesched_core::glam::DVec3;
use tilesched_core::snapshot::{MapSpec, PlayerSpec, Scenario, TaskSpec, WorldSpec};
use tilesched_core::RegionCoord;

fn region_task(map: &str, x: i32, z: i32) -> TaskSpec {
    TaskSpec::Map {
        map: map.into(),
        region: Some(RegionCoord::new(x, z)),
    }
}

/// Two worlds, one player near spawn, and a mix of single-region,
/// multi-region and cross-map tasks.
pub fn scenario() -> Scenario {
    Scenario {
        worlds: vec![
            WorldSpec {
                id: "overworld".into(),
                loaded: true,
                grid: None,
                grid_unavailable: false,
            },
            WorldSpec {
                id: "nether".into(),
                loaded: true,
                grid: None,
                grid_unavailable: false,
            },
        ],
        maps: vec![
            MapSpec {
                id: "world".into(),
                world: "overworld".into(),
            },
            MapSpec {
                id: "nether".into(),
                world: "nether".into(),
            },
        ],
        players: vec![PlayerSpec {
            name: "alex".into(),
            world: "overworld".into(),
            position: DVec3::new(130.5, 72.0, -40.2),
        }],
        tasks: vec![
            region_task("world", 6, 6),
            TaskSpec::Combined {
                tasks: vec![
                    region_task("world", 0, 0),
                    region_task("world", 0, -1),
                    region_task("world", 0, 0),
                ],
            },
            region_task("world", 1, 0),
            region_task("world", 0, -1),
            TaskSpec::Combined {
                tasks: vec![region_task("world", 2, 2), region_task("nether", 0, 0)],
            },
            region_task("nether", 0, 0),
            TaskSpec::Map {
                map: "world".into(),
                region: None,
            },
        ],
    }
}
