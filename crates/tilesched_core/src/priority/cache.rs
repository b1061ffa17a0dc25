//! Identity-keyed memo of computed priorities.

use super::TaskPriority;
use crate::task::TaskId;
use std::collections::HashMap;

/// Priorities by task identity.
///
/// Keys are [`TaskId`]s, so structurally equal tasks never share an entry.
/// Entries are written once and never replaced or evicted; the cache lives
/// as long as the comparator that owns it.
#[derive(Debug, Default)]
pub struct PriorityCache {
    entries: HashMap<TaskId, TaskPriority>,
}

impl PriorityCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: TaskId) -> Option<TaskPriority> {
        self.entries.get(&id).copied()
    }

    /// Store `priority` for `id` unless an entry exists; returns the stored
    /// value either way.
    pub fn insert(&mut self, id: TaskId, priority: TaskPriority) -> TaskPriority {
        *self.entries.entry(id).or_insert(priority)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
