//! Ordered store keyed by money/marine ratio.
//!
//! Backed by a B-tree, so inserts and deletes are O(log n) and traversal in
//! either direction is a lazy walk of the tree. Descending traversal (largest
//! ratio first) is what the allocators use; it is the same tree walked
//! right-node-left, selected by [Direction].

use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};

use crate::data::island::IslandId;
use crate::error::AllocationError;

/// Store key: an island's ratio plus its identity.
///
/// Equal ratios are ordered by id so that the island registered first is the
/// larger key and therefore visited first by a descending walk. Two islands
/// never share a key.
#[derive(Debug, Clone, Copy)]
pub struct RatioKey {
    pub ratio: f64,
    pub id: IslandId,
}

impl RatioKey {
    pub fn new(ratio: f64, id: IslandId) -> Self {
        Self { ratio, id }
    }
}

impl Ord for RatioKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio
            .total_cmp(&other.ratio)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for RatioKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RatioKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RatioKey {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone)]
pub struct OrderedRatioStore<V> {
    entries: BTreeMap<RatioKey, V>,
}

impl<V> Default for OrderedRatioStore<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> OrderedRatioStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert under `key`, returning the value previously stored there.
    pub fn insert(&mut self, key: RatioKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Remove the entry stored under exactly `key`.
    pub fn delete(&mut self, key: &RatioKey) -> Result<V, AllocationError> {
        self.entries
            .remove(key)
            .ok_or(AllocationError::KeyNotFound { ratio: key.ratio })
    }

    pub fn get(&self, key: &RatioKey) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &RatioKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entry with the largest ratio.
    pub fn max(&self) -> Option<(&RatioKey, &V)> {
        self.entries.last_key_value()
    }

    /// Entry with the smallest ratio.
    pub fn min(&self) -> Option<(&RatioKey, &V)> {
        self.entries.first_key_value()
    }

    pub fn iter(&self, direction: Direction) -> StoreIter<'_, V> {
        StoreIter {
            inner: self.entries.iter(),
            direction,
        }
    }

    /// Largest ratio first.
    pub fn descending(&self) -> StoreIter<'_, V> {
        self.iter(Direction::Descending)
    }
}

/// Lazy walk over the store in one direction. Finite and not restartable.
pub struct StoreIter<'a, V> {
    inner: btree_map::Iter<'a, RatioKey, V>,
    direction: Direction,
}

impl<'a, V> Iterator for StoreIter<'a, V> {
    type Item = (&'a RatioKey, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self.direction {
            Direction::Ascending => self.inner.next(),
            Direction::Descending => self.inner.next_back(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for StoreIter<'_, V> {}
