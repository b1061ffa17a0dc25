//! Flattens a task tree into the set of regions it touches.

use crate::region::RegionCoord;
use crate::task::{RenderTask, RenderTaskKind};
use std::collections::HashSet;

/// Distinct regions touched by `task` and all of its descendants.
///
/// Recurses once per tree level; see [`RenderTask::check_depth`].
pub fn collect_regions(task: &RenderTask) -> HashSet<RegionCoord> {
    let mut regions = HashSet::new();
    collect_into(task, &mut regions);
    regions
}

fn collect_into(task: &RenderTask, regions: &mut HashSet<RegionCoord>) {
    match task.kind() {
        RenderTaskKind::Combined(combined) => {
            for child in combined.tasks() {
                collect_into(child, regions);
            }
        }
        RenderTaskKind::Map(map_task) => {
            if let Some(region) = map_task.region() {
                regions.insert(region);
            }
        }
    }
}
