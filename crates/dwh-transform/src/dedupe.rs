//! Keep one record per natural key.

use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Survivors of a dedupe pass plus what was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeOutcome<R> {
    /// One record per distinct non-null key, ordered by key.
    pub rows: Vec<R>,
    /// Rows dropped because their key was null.
    pub null_keys: usize,
    /// Rows dropped because a newer row shared their key.
    pub superseded: usize,
}

/// Keep the most recent row for each key.
///
/// Rows with a null key are discarded before ranking. Within a key, rows are
/// stable-sorted by timestamp descending and the first is kept, so ties go
/// to the earliest input row and rows without a timestamp rank last.
pub fn latest_per_key<R, K, T>(
    rows: Vec<R>,
    key: impl Fn(&R) -> Option<K>,
    timestamp: impl Fn(&R) -> Option<T>,
) -> DedupeOutcome<R>
where
    K: Ord,
    T: Ord,
{
    let mut null_keys = 0usize;
    let mut groups: BTreeMap<K, Vec<R>> = BTreeMap::new();
    for row in rows {
        match key(&row) {
            Some(k) => groups.entry(k).or_default().push(row),
            None => null_keys += 1,
        }
    }

    let mut superseded = 0usize;
    let mut survivors = Vec::with_capacity(groups.len());
    for (_, mut group) in groups {
        superseded += group.len() - 1;
        // Option orders None below Some, so descending puts undated rows last.
        group.sort_by_key(|row| Reverse(timestamp(row)));
        survivors.extend(group.into_iter().next());
    }

    DedupeOutcome {
        rows: survivors,
        null_keys,
        superseded,
    }
}
