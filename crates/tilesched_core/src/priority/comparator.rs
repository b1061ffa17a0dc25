//! The ordering function handed to sorts and priority queues.

use super::{
    collect_regions, min_squared_distance, PlayerDistance, PlayerRegionIndex, PriorityCache,
    TaskPriority,
};
use crate::server::Server;
use crate::settings::SchedulerSettings;
use crate::task::{RenderTask, TaskRef};
use std::cmp::Ordering;
use tilesched_metrics::{metrics, Counter};

/// Orders render tasks by [`TaskPriority`].
///
/// Construct one per sort (or per priority-queue lifetime) and use it from a
/// single thread. Priorities and player positions are computed on first use
/// and reused for the comparator's whole lifetime, so every comparison in a
/// sort sees the same player snapshot.
///
/// ```ignore
/// let mut comparator = PriorityComparator::new(Some(&server));
/// tasks.sort_by(|a, b| comparator.compare(a, b));
/// ```
pub struct PriorityComparator<'a> {
    cache: PriorityCache,
    players: PlayerRegionIndex<'a>,
    counters: Counter,
}

impl<'a> PriorityComparator<'a> {
    /// Without a server every distance is infinite and tasks are ordered by
    /// region count alone.
    pub fn new(server: Option<&'a dyn Server>) -> Self {
        Self {
            cache: PriorityCache::new(),
            players: PlayerRegionIndex::new(server),
            counters: Counter::new(),
        }
    }

    /// Like [`new`](Self::new), dropping the server when distance
    /// tie-breaking is disabled in `settings`.
    pub fn from_settings(settings: &SchedulerSettings, server: Option<&'a dyn Server>) -> Self {
        Self::new(server.filter(|_| settings.distance_tiebreak))
    }

    /// Fewer regions first, then closer to a player first.
    ///
    /// `Equal` only means equal priority; where ties end up is up to the
    /// sort.
    pub fn compare(&mut self, a: &RenderTask, b: &RenderTask) -> Ordering {
        let pa = self.priority_of(a);
        let pb = self.priority_of(b);
        pa.cmp(&pb)
    }

    /// Cached priority of `task`, computing it on first request.
    pub fn priority_of(&mut self, task: &RenderTask) -> TaskPriority {
        if let Some(priority) = self.cache.get(task.id()) {
            metrics!(self.counters.increment("priority.cache_hit"));
            return priority;
        }

        metrics!(self.counters.increment("priority.cache_miss"));
        let priority = self.compute(task);
        self.cache.insert(task.id(), priority)
    }

    /// Stable sort of `tasks` by priority.
    pub fn sort(&mut self, tasks: &mut [TaskRef]) {
        tasks.sort_by(|a, b| self.compare(a, b));
        tracing::debug!(
            tasks = tasks.len(),
            cached = self.cache.len(),
            maps = self.players.len(),
            "render tasks ordered"
        );
    }

    /// Number of tasks with a cached priority.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Comparator and player-index counters combined.
    pub fn counters(&self) -> Counter {
        let mut counters = self.counters.clone();
        for (name, value) in self.players.counters().iter() {
            counters.add(name, value);
        }
        counters
    }

    fn compute(&mut self, task: &RenderTask) -> TaskPriority {
        let regions = collect_regions(task);
        let region_count = regions.len();

        let mut distance = PlayerDistance::Infinite;
        if self.players.has_server() && region_count > 0 {
            // Tasks spanning several maps keep the infinite distance.
            if let Some(map) = task.single_map() {
                let player_regions = self.players.regions_for(map);
                distance = min_squared_distance(&regions, player_regions);
            }
        }

        tracing::trace!(
            task = %task.id(),
            region_count,
            distance = %distance,
            "task priority computed"
        );
        TaskPriority::new(region_count, distance)
    }
}

/// Sort `tasks` with a fresh comparator, so player positions are read once
/// per call.
pub fn sort_by_priority(tasks: &mut [TaskRef], server: Option<&dyn Server>) {
    PriorityComparator::new(server).sort(tasks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::DVec3;
    use crate::region::RegionCoord;
    use crate::snapshot::{SnapshotMap, SnapshotServer, SnapshotWorld};
    use crate::world::TileMap;
    use std::sync::Arc;

    struct Fixture {
        server: SnapshotServer,
        world_map: Arc<dyn TileMap>,
        nether_map: Arc<dyn TileMap>,
    }

    /// One player standing in region (0, 0) of the overworld.
    fn fixture() -> Fixture {
        let overworld = Arc::new(SnapshotWorld::new("overworld"));
        let nether = Arc::new(SnapshotWorld::new("nether"));
        let mut server = SnapshotServer::new();
        let overworld_id = server.load_world("overworld");
        server.load_world("nether");
        server.add_player("alex", overworld_id, DVec3::new(10.0, 64.0, 10.0));

        Fixture {
            server,
            world_map: Arc::new(SnapshotMap::new("world", overworld)),
            nether_map: Arc::new(SnapshotMap::new("nether", nether)),
        }
    }

    fn at(map: &Arc<dyn TileMap>, x: i32, z: i32) -> TaskRef {
        RenderTask::map(map.clone(), Some(RegionCoord::new(x, z)))
    }

    #[test]
    fn fewer_regions_sort_first() {
        let fx = fixture();
        let a = at(&fx.world_map, 0, 0);
        let b = RenderTask::combined(vec![at(&fx.world_map, 0, 0), at(&fx.world_map, 1, 1)]);

        let mut with_server = PriorityComparator::new(Some(&fx.server));
        assert_eq!(with_server.compare(&a, &b), Ordering::Less);

        let mut without = PriorityComparator::new(None);
        assert_eq!(without.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn region_count_dominates_even_when_farther() {
        let fx = fixture();
        let far_single = at(&fx.world_map, 40, 40);
        let near_pair =
            RenderTask::combined(vec![at(&fx.world_map, 0, 0), at(&fx.world_map, 0, 1)]);

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(comparator.compare(&far_single, &near_pair), Ordering::Less);
        assert_eq!(comparator.compare(&near_pair, &far_single), Ordering::Greater);
    }

    #[test]
    fn closer_to_a_player_sorts_first() {
        let fx = fixture();
        let a = at(&fx.world_map, 0, 0);
        let b = at(&fx.world_map, 5, 5);

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(comparator.compare(&a, &b), Ordering::Less);
        assert_eq!(
            comparator.priority_of(&a),
            TaskPriority::new(1, PlayerDistance::Finite(0))
        );
        assert_eq!(
            comparator.priority_of(&b),
            TaskPriority::new(1, PlayerDistance::Finite(50))
        );
    }

    #[test]
    fn regionless_combined_task_skips_player_lookup() {
        let fx = fixture();
        let empty = RenderTask::combined(vec![
            RenderTask::map(fx.world_map.clone(), None),
            RenderTask::map(fx.world_map.clone(), None),
        ]);

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(
            comparator.priority_of(&empty),
            TaskPriority::new(0, PlayerDistance::Infinite)
        );
        assert!(comparator.players.is_empty());
    }

    #[test]
    fn no_server_orders_by_region_count_only() {
        let fx = fixture();
        let a = at(&fx.world_map, 0, 0);
        let b = at(&fx.world_map, 5, 5);

        let mut comparator = PriorityComparator::new(None);
        assert_eq!(comparator.compare(&a, &b), Ordering::Equal);
        assert_eq!(
            comparator.priority_of(&a).distance,
            PlayerDistance::Infinite
        );
    }

    #[test]
    fn disabled_tiebreak_in_settings_drops_the_server() {
        let fx = fixture();
        let settings = SchedulerSettings {
            distance_tiebreak: false,
            ..SchedulerSettings::default()
        };
        let a = at(&fx.world_map, 0, 0);

        let mut comparator = PriorityComparator::from_settings(&settings, Some(&fx.server));
        assert_eq!(comparator.priority_of(&a).distance, PlayerDistance::Infinite);

        let mut enabled =
            PriorityComparator::from_settings(&SchedulerSettings::default(), Some(&fx.server));
        assert_eq!(enabled.priority_of(&a).distance, PlayerDistance::Finite(0));
    }

    #[test]
    fn combined_task_on_one_map_gets_a_distance() {
        let fx = fixture();
        let combined =
            RenderTask::combined(vec![at(&fx.world_map, 3, 0), at(&fx.world_map, 2, 0)]);

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(
            comparator.priority_of(&combined),
            TaskPriority::new(2, PlayerDistance::Finite(4))
        );
    }

    #[test]
    fn combined_task_across_maps_stays_infinite() {
        let fx = fixture();
        let combined =
            RenderTask::combined(vec![at(&fx.world_map, 0, 0), at(&fx.nether_map, 0, 0)]);

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(
            comparator.priority_of(&combined),
            TaskPriority::new(1, PlayerDistance::Infinite)
        );
    }

    #[test]
    fn players_in_other_worlds_do_not_count() {
        let fx = fixture();
        let nether_task = at(&fx.nether_map, 0, 0);

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(
            comparator.priority_of(&nether_task).distance,
            PlayerDistance::Infinite
        );
    }

    #[test]
    fn compare_is_antisymmetric_and_deterministic() {
        let fx = fixture();
        let tasks = vec![
            at(&fx.world_map, 0, 0),
            at(&fx.world_map, 5, 5),
            at(&fx.world_map, -5, 5),
            at(&fx.nether_map, 1, 1),
            RenderTask::combined(vec![at(&fx.world_map, 0, 0), at(&fx.world_map, 2, 2)]),
            RenderTask::combined(Vec::new()),
        ];

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        for a in &tasks {
            for b in &tasks {
                let ab = comparator.compare(a, b);
                let ba = comparator.compare(b, a);
                assert_eq!(ab, ba.reverse());
                assert_eq!(ab, comparator.compare(a, b));
                assert_eq!(
                    ab == Ordering::Equal,
                    comparator.priority_of(a) == comparator.priority_of(b)
                );
            }
        }
    }

    #[test]
    fn structurally_equal_tasks_are_cached_separately() {
        let fx = fixture();
        let a = at(&fx.world_map, 1, 1);
        let b = at(&fx.world_map, 1, 1);

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(comparator.compare(&a, &b), Ordering::Equal);
        assert_eq!(comparator.cached_len(), 2);
        let _ = comparator.compare(&a, &b);
        assert_eq!(comparator.cached_len(), 2);
        metrics!({
            let counters = comparator.counters();
            assert_eq!(counters.get("priority.cache_miss"), 2);
            assert_eq!(counters.get("priority.cache_hit"), 2);
            assert_eq!(counters.get("players.snapshot"), 1);
        });
    }

    #[test]
    fn player_snapshot_is_fixed_for_the_comparator_lifetime() {
        let mut fx = fixture();
        let a = at(&fx.world_map, 0, 0);
        let b = at(&fx.world_map, 5, 5);

        {
            let mut comparator = PriorityComparator::new(Some(&fx.server));
            assert_eq!(comparator.compare(&a, &b), Ordering::Less);
        }

        // Move the only player next to b; a new comparator sees it.
        fx.server.clear_players();
        let overworld = fx.server.load_world("overworld");
        fx.server.add_player("alex", overworld, DVec3::new(2600.0, 64.0, 2600.0));

        let mut comparator = PriorityComparator::new(Some(&fx.server));
        assert_eq!(comparator.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn sort_orders_by_priority() {
        let fx = fixture();
        let far = at(&fx.world_map, 9, 9);
        let near = at(&fx.world_map, 1, 0);
        let big = RenderTask::combined(vec![at(&fx.world_map, 0, 0), at(&fx.world_map, 0, 1)]);
        let nowhere = RenderTask::map(fx.world_map.clone(), None);

        let mut tasks = vec![big.clone(), far.clone(), nowhere.clone(), near.clone()];
        sort_by_priority(&mut tasks, Some(&fx.server));

        let ids: Vec<_> = tasks.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![nowhere.id(), near.id(), far.id(), big.id()]);
    }
}
