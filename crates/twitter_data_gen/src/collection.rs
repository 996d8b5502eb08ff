//! Collection builder: run a generator N times, optionally deduplicating.

use crate::entity::{Entity, EntityKind};
use crate::renderer::TableData;
use ahash::AHashSet;
use serde::Serialize;
use std::hash::Hash;

/// Generated records of one kind plus the count that was asked for.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    pub requested: usize,
    pub records: Vec<T>,
}

impl<T> Collection<T> {
    /// Number of records after deduplication
    pub fn realized(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Entity> Collection<T> {
    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            kind: T::KIND,
            requested: self.requested,
            realized: self.realized(),
        }
    }

    pub fn to_table(&self) -> TableData {
        TableData {
            kind: T::KIND,
            rows: self.records.iter().map(T::to_row).collect(),
        }
    }
}

/// Requested vs realized counts for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub kind: EntityKind,
    pub requested: usize,
    pub realized: usize,
}

impl CollectionSummary {
    /// Rows lost to deduplication
    pub fn duplicates(&self) -> usize {
        self.requested - self.realized
    }
}

/// Invoke `generate` exactly `count` times. With `dedup`, duplicates are
/// dropped afterwards, so the result may hold fewer than `count` records.
pub fn collect_records<T, F>(count: usize, dedup: bool, mut generate: F) -> Collection<T>
where
    T: Eq + Hash + Clone,
    F: FnMut() -> T,
{
    let records: Vec<T> = (0..count).map(|_| generate()).collect();
    let records = if dedup {
        dedup_preserving_order(records)
    } else {
        records
    };
    Collection {
        requested: count,
        records,
    }
}

/// Drop repeated records, keeping the first occurrence of each.
pub fn dedup_preserving_order<T>(records: Vec<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = AHashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_keeps_duplicates() {
        let mut n = 0;
        let collection = collect_records(6, false, || {
            n += 1;
            n % 2
        });
        assert_eq!(collection.records, vec![1, 0, 1, 0, 1, 0]);
        assert_eq!(collection.realized(), 6);
    }

    #[test]
    fn test_dedup_happens_after_generation() {
        let mut calls = 0;
        let collection = collect_records(10, true, || {
            calls += 1;
            calls % 3
        });
        assert_eq!(calls, 10);
        assert_eq!(collection.requested, 10);
        assert_eq!(collection.records, vec![1, 2, 0]);
    }

    #[test]
    fn test_zero_count() {
        let collection = collect_records(0, true, || -> u8 { unreachable!() });
        assert!(collection.is_empty());
    }

    #[test]
    fn test_dedup_preserving_order() {
        let deduped = dedup_preserving_order(vec!["b", "a", "b", "c", "a"]);
        assert_eq!(deduped, vec!["b", "a", "c"]);
    }
}
