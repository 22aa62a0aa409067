//! Unit tests for the event feed hand-off.

use crate::helpers::payload;
use playfield_monitor::event_log::{EventFeed, EventLogView};
use playfield_monitor::types::{Payload, SortOrder};
use serde_json::json;
use std::thread;

#[test]
fn test_drain_preserves_arrival_order() {
    let (sender, feed) = EventFeed::channel();
    sender.send("ball_started", Payload::new());
    sender.send("switch_active", payload(&[("state", json!(1))]));
    assert_eq!(feed.pending(), 2);

    let mut view = EventLogView::new();
    view.set_sort(SortOrder::ReceivedAsc);
    assert_eq!(feed.drain_into(&mut view), 2);
    assert_eq!(feed.pending(), 0);

    let names: Vec<&str> = view.rows().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["ball_started", "switch_active"]);
}

#[test]
fn test_empty_drain_is_noop() {
    let (_sender, feed) = EventFeed::channel();
    let mut view = EventLogView::new();
    assert_eq!(feed.drain_into(&mut view), 0);
    assert_eq!(view.record_count(), 0);
}

#[test]
fn test_senders_post_from_other_threads() {
    let (sender, feed) = EventFeed::channel();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let sender = sender.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    sender.send(format!("worker_{t}"), payload(&[("i", json!(i))]));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut view = EventLogView::new();
    assert_eq!(feed.drain_into(&mut view), 100);
    assert_eq!(view.record_count(), 100);

    view.set_filter("worker_2");
    assert_eq!(view.visible_count(), 25);
}

#[test]
fn test_drain_returns_pending_events() {
    let (sender, feed) = EventFeed::channel();
    sender.send("a", Payload::new());
    let drained = feed.drain();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].name, "a");
    assert!(feed.drain().is_empty());
}
