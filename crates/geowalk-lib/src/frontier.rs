//! Priority-ordered container used by the frontier search strategy.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Min-priority queue keyed by `f64` priorities.
///
/// Equal priorities are resolved by the item's own ordering (smaller first) and
/// then by insertion order, so extraction order is fully deterministic. NaN
/// priorities sort after every finite value.
#[derive(Debug, Clone)]
pub struct PriorityFrontier<T: Ord> {
    heap: BinaryHeap<FrontierEntry<T>>,
    sequence: u64,
}

impl<T: Ord> PriorityFrontier<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            sequence: 0,
        }
    }

    /// Place `item` with the given priority.
    pub fn insert(&mut self, item: T, priority: f64) {
        self.heap.push(FrontierEntry {
            priority: FloatOrd(priority),
            item,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    /// Remove and return the lowest-priority item.
    pub fn extract_min(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    /// Remove and return the lowest-priority item together with its priority.
    pub fn extract_min_with_priority(&mut self) -> Option<(T, f64)> {
        self.heap
            .pop()
            .map(|entry| (entry.item, entry.priority.0))
    }

    /// Priority of the item `extract_min` would return next.
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.priority.0)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T: Ord> Default for PriorityFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone)]
struct FrontierEntry<T> {
    priority: FloatOrd,
    item: T,
    sequence: u64,
}

impl<T: Ord> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for FrontierEntry<T> {}

impl<T: Ord> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.item.cmp(&self.item))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T: Ord> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_priority_order() {
        let mut frontier = PriorityFrontier::new();
        frontier.insert("far", 9.5);
        frontier.insert("near", 0.25);
        frontier.insert("middle", 3.0);

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.peek_priority(), Some(0.25));
        assert_eq!(frontier.extract_min(), Some("near"));
        assert_eq!(frontier.extract_min(), Some("middle"));
        assert_eq!(frontier.extract_min_with_priority(), Some(("far", 9.5)));
        assert!(frontier.is_empty());
        assert_eq!(frontier.extract_min(), None);
    }

    #[test]
    fn equal_priorities_prefer_smaller_item() {
        let mut frontier = PriorityFrontier::with_capacity(3);
        frontier.insert(7usize, 1.0);
        frontier.insert(2usize, 1.0);
        frontier.insert(5usize, 1.0);

        assert_eq!(frontier.extract_min(), Some(2));
        assert_eq!(frontier.extract_min(), Some(5));
        assert_eq!(frontier.extract_min(), Some(7));
    }

    #[test]
    fn identical_entries_pop_in_insertion_order() {
        let mut frontier: PriorityFrontier<(u8, u8)> = PriorityFrontier::default();
        frontier.insert((1, 1), 4.0);
        frontier.insert((1, 1), 4.0);
        assert_eq!(frontier.extract_min_with_priority(), Some(((1, 1), 4.0)));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn nan_priorities_sort_last() {
        let mut frontier = PriorityFrontier::new();
        frontier.insert(1u8, f64::NAN);
        frontier.insert(2u8, 100.0);
        assert_eq!(frontier.extract_min(), Some(2));
        assert_eq!(frontier.extract_min(), Some(1));
    }
}
