//! Single-consumer hand-off between the event transport and the UI thread.
//!
//! Transports may post from any thread through a [`FeedSender`]. Only the
//! UI thread owns the [`EventFeed`] and drains it into the view, so an
//! append and the render that follows it are never interleaved with a read.

use super::view::EventLogView;
use crate::types::Payload;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// An event waiting to be appended
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEvent {
    pub name: String,
    pub payload: Payload,
}

type Queue = Arc<Mutex<VecDeque<PendingEvent>>>;

/// Producer side. Cheap to clone, usable from any thread.
#[derive(Clone, Debug)]
pub struct FeedSender {
    queue: Queue,
}

impl FeedSender {
    pub fn send(&self, name: impl Into<String>, payload: Payload) {
        self.queue.lock().push_back(PendingEvent {
            name: name.into(),
            payload,
        });
    }
}

/// Consumer side, owned by the UI thread.
#[derive(Debug)]
pub struct EventFeed {
    queue: Queue,
}

impl EventFeed {
    /// Create a connected sender/consumer pair
    pub fn channel() -> (FeedSender, EventFeed) {
        let queue: Queue = Arc::new(Mutex::new(VecDeque::new()));
        (
            FeedSender {
                queue: queue.clone(),
            },
            EventFeed { queue },
        )
    }

    /// Events posted but not yet drained
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Take every pending event in arrival order
    pub fn drain(&self) -> VecDeque<PendingEvent> {
        std::mem::take(&mut *self.queue.lock())
    }

    /// Append every pending event to the view. Returns how many were moved.
    ///
    /// The lock is released before appending so producers never wait on
    /// projection work.
    pub fn drain_into(&self, view: &mut EventLogView) -> usize {
        crate::profile_scope!("event_feed.drain");
        let pending = self.drain();
        let count = pending.len();
        for event in pending {
            view.append(event.name, event.payload);
        }
        if count > 0 {
            debug!(count, "Drained event feed");
        }
        count
    }
}
