//! Render task tree
//!
//! A task is either bound to one map (and optionally one region of it) or
//! combines an ordered list of child tasks. Tasks are shared as [`TaskRef`]s
//! and are never cloned: each one carries a process-unique [`TaskId`], so two
//! structurally equal tasks remain distinct entities.

use crate::error::TaskTreeError;
use crate::region::RegionCoord;
use crate::world::TileMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a task instance (not of its contents).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        Self(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared handle to an immutable task.
pub type TaskRef = Arc<RenderTask>;

#[derive(Debug)]
pub struct RenderTask {
    id: TaskId,
    kind: RenderTaskKind,
}

#[derive(Debug)]
pub enum RenderTaskKind {
    Map(MapRenderTask),
    Combined(CombinedRenderTask),
}

/// Work on one map, optionally confined to a single region.
pub struct MapRenderTask {
    map: Arc<dyn TileMap>,
    region: Option<RegionCoord>,
}

impl MapRenderTask {
    pub fn map(&self) -> &dyn TileMap {
        self.map.as_ref()
    }

    pub fn region(&self) -> Option<RegionCoord> {
        self.region
    }
}

impl fmt::Debug for MapRenderTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapRenderTask")
            .field("map", self.map.id())
            .field("region", &self.region)
            .finish()
    }
}

/// Ordered aggregate of child tasks. Has no region of its own.
#[derive(Debug)]
pub struct CombinedRenderTask {
    tasks: Vec<TaskRef>,
}

impl CombinedRenderTask {
    pub fn tasks(&self) -> &[TaskRef] {
        &self.tasks
    }
}

impl RenderTask {
    /// Atomic task on `map`, covering `region` if given.
    pub fn map(map: Arc<dyn TileMap>, region: Option<RegionCoord>) -> TaskRef {
        Arc::new(Self {
            id: TaskId::next(),
            kind: RenderTaskKind::Map(MapRenderTask { map, region }),
        })
    }

    /// Composite task over `tasks`, in order.
    pub fn combined(tasks: Vec<TaskRef>) -> TaskRef {
        Arc::new(Self {
            id: TaskId::next(),
            kind: RenderTaskKind::Combined(CombinedRenderTask { tasks }),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn kind(&self) -> &RenderTaskKind {
        &self.kind
    }

    /// Distinct regions this task touches, across all descendants.
    pub fn regions(&self) -> HashSet<RegionCoord> {
        crate::priority::collect_regions(self)
    }

    /// Number of levels in the tree rooted here (an atomic task is 1).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((task, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let RenderTaskKind::Combined(combined) = &task.kind {
                stack.extend(combined.tasks.iter().map(|child| (child.as_ref(), depth + 1)));
            }
        }
        deepest
    }

    /// Reject trees nested deeper than `limit` levels.
    ///
    /// Region collection recurses once per level, so trees must pass this
    /// check before they are ordered. The walk itself is iterative and
    /// stops at the first level beyond the limit.
    pub fn check_depth(&self, limit: usize) -> Result<(), TaskTreeError> {
        let mut stack = vec![(self, 1usize)];
        while let Some((task, depth)) = stack.pop() {
            if depth > limit {
                return Err(TaskTreeError::NestingTooDeep { limit });
            }
            if let RenderTaskKind::Combined(combined) = &task.kind {
                stack.extend(combined.tasks.iter().map(|child| (child.as_ref(), depth + 1)));
            }
        }
        Ok(())
    }

    /// The single map this task works on.
    ///
    /// For a combined task this is the map shared by every atomic
    /// descendant; `None` if there is no atomic descendant or they span
    /// more than one map.
    pub fn single_map(&self) -> Option<&dyn TileMap> {
        let mut found = None;
        if self.visit_maps(&mut found) {
            found
        } else {
            None
        }
    }

    /// Returns false as soon as a second distinct map is seen.
    fn visit_maps<'t>(&'t self, found: &mut Option<&'t dyn TileMap>) -> bool {
        match &self.kind {
            RenderTaskKind::Map(task) => match *found {
                Some(map) => map.id() == task.map.id(),
                None => {
                    *found = Some(task.map.as_ref());
                    true
                }
            },
            RenderTaskKind::Combined(combined) => combined
                .tasks
                .iter()
                .all(|child| child.visit_maps(found)),
        }
    }
}
