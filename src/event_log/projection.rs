//! Filtered and sorted projection over the event log.
//!
//! The projection is a list of positions into the log, never a copy of the
//! records. It is a pure function of (records, filter, order), so computing
//! it twice over unchanged inputs yields the same ordering.

use super::filter::NameFilter;
use super::model::EventLog;
use crate::types::{EventRecord, SortOrder};
use std::cmp::{Ordering, Reverse};

/// Total order of two records under a sort order.
///
/// Name orders compare case-insensitively, then by exact name, and fall back
/// to sequence ascending so equal names never appear in arrival-dependent
/// order. Sequences are unique, so no two records compare equal.
pub fn compare(a: &EventRecord, b: &EventRecord, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Unsorted | SortOrder::ReceivedAsc => a.sequence.cmp(&b.sequence),
        SortOrder::ReceivedDesc => b.sequence.cmp(&a.sequence),
        SortOrder::NameAsc => name_cmp(a, b).then(a.sequence.cmp(&b.sequence)),
        SortOrder::NameDesc => name_cmp(b, a).then(a.sequence.cmp(&b.sequence)),
    }
}

fn name_cmp(a: &EventRecord, b: &EventRecord) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Compute the projection from scratch.
pub fn project(log: &EventLog, filter: &NameFilter, order: SortOrder) -> Vec<usize> {
    let mut positions: Vec<usize> = log
        .records()
        .enumerate()
        .filter(|(_, record)| filter.matches(&record.name))
        .map(|(pos, _)| pos)
        .collect();

    // Log order is already sequence ascending
    match order {
        SortOrder::Unsorted | SortOrder::ReceivedAsc => {}
        SortOrder::ReceivedDesc => positions.reverse(),
        // Name keys are lowercased once per record instead of per comparison
        SortOrder::NameAsc => positions.sort_by_cached_key(|&pos| {
            let record = &log[pos];
            (record.name.to_lowercase(), record.name.clone(), record.sequence)
        }),
        SortOrder::NameDesc => positions.sort_by_cached_key(|&pos| {
            let record = &log[pos];
            (
                Reverse(record.name.to_lowercase()),
                Reverse(record.name.clone()),
                record.sequence,
            )
        }),
    }

    positions
}

/// Insert a newly appended record into an up-to-date projection.
///
/// Returns the row it landed on, or None if the filter rejects it.
pub fn insert(
    positions: &mut Vec<usize>,
    log: &EventLog,
    pos: usize,
    filter: &NameFilter,
    order: SortOrder,
) -> Option<usize> {
    let record = &log[pos];
    if !filter.matches(&record.name) {
        return None;
    }

    let row = positions.partition_point(|&other| compare(&log[other], record, order) == Ordering::Less);
    positions.insert(row, pos);
    Some(row)
}

/// Drop the `evicted` oldest positions and shift the rest down.
pub fn evict_front(positions: &mut Vec<usize>, evicted: usize) {
    if evicted == 0 {
        return;
    }
    positions.retain(|&pos| pos >= evicted);
    for pos in positions.iter_mut() {
        *pos -= evicted;
    }
}
