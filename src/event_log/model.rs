//! Append-only event storage.

use crate::constants::ORIGIN_CHANNEL_KEY;
use crate::types::{EventRecord, Payload};
use std::collections::VecDeque;
use std::ops::Index;
use tracing::trace;

/// Optional retention policy applied at the append boundary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Keep every record
    #[default]
    Unbounded,
    /// Keep only the newest N records
    KeepLatest(usize),
}

/// Result of a single append
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Appended {
    /// Sequence assigned to the new record
    pub sequence: u64,
    /// Number of old records evicted by the retention policy
    pub evicted: usize,
}

/// The event history in arrival order.
///
/// Records are only ever pushed at the back and, under a retention cap,
/// popped at the front. Sequence numbers keep counting across evictions.
#[derive(Debug, Default)]
pub struct EventLog {
    records: VecDeque<EventRecord>,
    next_sequence: u64,
    retention: RetentionPolicy,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self {
            retention,
            ..Self::default()
        }
    }

    /// Store a new event.
    ///
    /// The transport's origin-channel marker is removed from the payload
    /// before storage. Never fails.
    pub fn append(&mut self, name: impl Into<String>, mut payload: Payload) -> Appended {
        payload.remove(ORIGIN_CHANNEL_KEY);

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let name = name.into();
        trace!(sequence, name = %name, "Event appended");
        self.records.push_back(EventRecord {
            sequence,
            name,
            payload,
        });

        let evicted = self.enforce_retention();
        Appended { sequence, evicted }
    }

    fn enforce_retention(&mut self) -> usize {
        match self.retention {
            RetentionPolicy::Unbounded => 0,
            RetentionPolicy::KeepLatest(max) => {
                let excess = self.records.len().saturating_sub(max);
                self.records.drain(..excess);
                excess
            }
        }
    }

    /// Current number of stored records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in arrival order
    pub fn records(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    pub fn get(&self, pos: usize) -> Option<&EventRecord> {
        self.records.get(pos)
    }

    /// Sequence the next append will receive
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }
}

impl Index<usize> for EventLog {
    type Output = EventRecord;

    fn index(&self, pos: usize) -> &EventRecord {
        &self.records[pos]
    }
}
