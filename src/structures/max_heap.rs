//! Array-backed max-heap keyed by an explicit `f64` priority.
//!
//! Priorities are attached at insertion time and never updated in place; an
//! item whose priority changes must be extracted and inserted again.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct HeapEntry<T> {
    priority: f64,
    item: T,
}

// Larger priority wins; on equal priority the smaller item wins.
impl<T: Ord> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.item.cmp(&self.item))
    }
}

impl<T: Ord> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for HeapEntry<T> {}

#[derive(Debug, Clone)]
pub struct MaxPriorityHeap<T: Ord> {
    entries: BinaryHeap<HeapEntry<T>>,
}

impl<T: Ord> Default for MaxPriorityHeap<T> {
    fn default() -> Self {
        Self {
            entries: BinaryHeap::new(),
        }
    }
}

impl<T: Ord> MaxPriorityHeap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a heap from `(priority, item)` pairs in O(n).
    pub fn heapify<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (f64, T)>,
    {
        let entries: Vec<HeapEntry<T>> = items
            .into_iter()
            .map(|(priority, item)| HeapEntry { priority, item })
            .collect();
        Self {
            entries: BinaryHeap::from(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, priority: f64, item: T) {
        self.entries.push(HeapEntry { priority, item });
    }

    pub fn peek_max(&self) -> Option<(f64, &T)> {
        self.entries.peek().map(|entry| (entry.priority, &entry.item))
    }

    pub fn extract_max(&mut self) -> Option<(f64, T)> {
        self.entries.pop().map(|entry| (entry.priority, entry.item))
    }
}
