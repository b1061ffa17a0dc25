//! Named event counters

use std::collections::BTreeMap;

/// Counters keyed by static names (e.g. `"priority.cache_hit"`).
///
/// Backed by a `BTreeMap` so `iter` yields names in a stable order for logs.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    counters: BTreeMap<&'static str, u64>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            counters: BTreeMap::new(),
        }
    }

    pub fn increment(&mut self, name: &'static str) {
        self.add(name, 1);
    }

    pub fn add(&mut self, name: &'static str, value: u64) {
        *self.counters.entry(name).or_insert(0) += value;
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn reset_all(&mut self) {
        self.counters.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counters.iter().map(|(&name, &value)| (name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_accumulate_per_name() {
        let mut counter = Counter::new();
        counter.increment("hit");
        counter.increment("hit");
        counter.add("miss", 5);

        assert_eq!(counter.get("hit"), 2);
        assert_eq!(counter.get("miss"), 5);
        assert_eq!(counter.get("unknown"), 0);
    }

    #[test]
    fn iter_is_sorted_by_name() {
        let mut counter = Counter::new();
        counter.increment("b");
        counter.increment("a");

        let names: Vec<_> = counter.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);

        counter.reset_all();
        assert_eq!(counter.iter().count(), 0);
    }
}
