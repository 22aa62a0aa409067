//! Unit tests for the event log view-controller.

use crate::helpers::{payload, record, view_with_names};
use playfield_monitor::event_log::{
    EventLogView, NameFilter, RetentionPolicy, RowsChanged, projection,
};
use playfield_monitor::types::{EventValue, Payload, SortOrder};
use serde_json::json;

const NAMES: &[&str] = &[
    "ball_started",
    "switch_active",
    "Ball_Ended",
    "player_add_success",
    "mode_attract_started",
    "ball_save_active",
];

/// Sequences the view should show, computed from scratch
fn expected_sequences(view: &EventLogView) -> Vec<u64> {
    let filter = NameFilter::new(view.filter_text());
    projection::project(view.log(), &filter, view.sort())
        .into_iter()
        .map(|pos| view.log()[pos].sequence)
        .collect()
}

// ============================================================================
// Append
// ============================================================================

#[test]
fn test_sequences_strictly_increase() {
    let mut view = EventLogView::new();
    let mut last = None;
    for i in 0..50 {
        let seq = view.append(format!("event_{}", i % 7), Payload::new());
        if let Some(prev) = last {
            assert!(seq > prev);
        }
        last = Some(seq);
    }
    assert_eq!(view.record_count(), 50);
    assert_eq!(view.log().next_sequence(), 50);
}

#[test]
fn test_origin_key_is_stripped() {
    let mut view = EventLogView::new();
    view.append(
        "player_score",
        payload(&[("_from_bcp", json!(true)), ("value", json!(1500))]),
    );

    let record = view.rows().next().unwrap();
    assert!(!record.payload.contains_key("_from_bcp"));
    assert_eq!(record.payload.get("value"), Some(&EventValue::Integer(1500)));
    assert_eq!(record.data_text(), "{value: 1500}");
}

#[test]
fn test_append_accepts_heterogeneous_payloads() {
    let mut view = EventLogView::new();
    view.append("a", payload(&[("list", json!([1, "two", null]))]));
    view.append("a", payload(&[("nested", json!({"x": 1.5}))]));
    view.append("a", Payload::new());
    assert_eq!(view.record_count(), 3);
}

// ============================================================================
// Filter
// ============================================================================

#[test]
fn test_filter_substring_case_insensitive() {
    let mut view = view_with_names(NAMES);
    view.set_sort(SortOrder::ReceivedAsc);

    view.set_filter("BALL");
    assert_eq!(view.sequences(), vec![0, 2, 5]);

    view.set_filter("active");
    assert_eq!(view.sequences(), vec![1, 5]);
}

#[test]
fn test_empty_filter_matches_everything() {
    let mut view = view_with_names(NAMES);
    view.set_filter("ball");
    view.set_filter("");
    assert_eq!(view.visible_count(), NAMES.len());
}

#[test]
fn test_filter_does_not_search_payload() {
    let mut view = EventLogView::new();
    view.append("switch_active", payload(&[("name", json!("ball"))]));
    view.set_filter("ball");
    assert_eq!(view.visible_count(), 0);
}

#[test]
fn test_wildcard_filter() {
    let mut view = view_with_names(NAMES);
    view.set_sort(SortOrder::ReceivedAsc);

    view.set_filter("ball*ed");
    assert_eq!(view.sequences(), vec![0, 2]);

    view.set_filter("s?itch");
    assert_eq!(view.sequences(), vec![1]);
}

#[test]
fn test_malformed_filter_matches_literally() {
    let mut view = view_with_names(&["ball_started", "weird[ball"]);
    view.set_filter("[ball");
    assert_eq!(view.sequences(), vec![1]);
}

#[test]
fn test_filter_folds_unicode_case() {
    let mut view = view_with_names(&["ΟΔΟΣ", "ball_started"]);
    view.set_filter("Σ");
    assert_eq!(view.visible_count(), 1);
    assert_eq!(view.sequences(), vec![0]);

    view.set_filter("οδος");
    assert_eq!(view.sequences(), vec![0]);
}

// ============================================================================
// Sort
// ============================================================================

#[test]
fn test_default_sort_is_newest_first() {
    let view = view_with_names(&["a", "b", "c"]);
    assert_eq!(view.sort(), SortOrder::ReceivedDesc);
    assert_eq!(view.sequences(), vec![2, 1, 0]);
}

#[test]
fn test_sort_orders() {
    let mut view = view_with_names(&["b", "A", "c"]);

    view.set_sort(SortOrder::ReceivedAsc);
    assert_eq!(view.sequences(), vec![0, 1, 2]);

    view.set_sort(SortOrder::NameAsc);
    assert_eq!(view.sequences(), vec![1, 0, 2]);

    view.set_sort(SortOrder::NameDesc);
    assert_eq!(view.sequences(), vec![2, 0, 1]);
}

#[test]
fn test_equal_names_tie_break_on_sequence() {
    let mut view = view_with_names(&["a", "b", "c", "X", "d", "e", "f", "X"]);
    view.set_filter("x");

    view.set_sort(SortOrder::NameAsc);
    assert_eq!(view.sequences(), vec![3, 7]);

    view.set_sort(SortOrder::NameDesc);
    assert_eq!(view.sequences(), vec![3, 7]);
}

#[test]
fn test_unsorted_placeholder_is_refused() {
    let mut view = view_with_names(&["a", "b"]);
    let sorts = record(&mut view.on_sort_changed);

    assert!(!view.set_sort(SortOrder::Unsorted));
    assert_eq!(view.sort(), SortOrder::ReceivedDesc);
    assert!(sorts.borrow().is_empty());
}

// ============================================================================
// Projection consistency
// ============================================================================

#[test]
fn test_incremental_appends_match_full_recompute() {
    for &order in SortOrder::all().iter().filter(|o| o.is_selectable()) {
        let mut view = EventLogView::new();
        view.set_sort(order);
        view.set_filter("ball");
        for i in 0..40 {
            view.append(NAMES[(i * 5) % NAMES.len()], Payload::new());
        }
        assert_eq!(view.sequences(), expected_sequences(&view), "order {:?}", order);
    }
}

#[test]
fn test_refresh_is_idempotent() {
    let mut view = view_with_names(NAMES);
    view.set_sort(SortOrder::NameAsc);
    view.set_filter("_");

    let before = view.sequences();
    view.refresh();
    view.refresh();
    assert_eq!(view.sequences(), before);
}

#[test]
fn test_projection_stats_recorded() {
    let mut view = view_with_names(&["a"]);
    let before = view.projection_stats().count();
    view.set_filter("a");
    view.set_sort(SortOrder::NameAsc);
    assert_eq!(view.projection_stats().count(), before + 2);
}

// ============================================================================
// Retention
// ============================================================================

#[test]
fn test_retention_keeps_latest() {
    let mut view = EventLogView::with_retention(RetentionPolicy::KeepLatest(3));
    view.set_sort(SortOrder::ReceivedAsc);
    for name in NAMES.iter().take(5) {
        view.append(*name, Payload::new());
    }

    assert_eq!(view.record_count(), 3);
    assert_eq!(view.sequences(), vec![2, 3, 4]);
    // Sequences are never reused after eviction
    assert_eq!(view.append("late", Payload::new()), 5);
    assert_eq!(view.sequences(), expected_sequences(&view));
}

#[test]
fn test_retention_with_filter_and_name_sort() {
    let mut view = EventLogView::with_retention(RetentionPolicy::KeepLatest(4));
    view.set_sort(SortOrder::NameDesc);
    view.set_filter("ball");
    for i in 0..20 {
        view.append(NAMES[i % NAMES.len()], Payload::new());
    }
    assert_eq!(view.record_count(), 4);
    assert_eq!(view.sequences(), expected_sequences(&view));
}

#[test]
fn test_zero_retention_keeps_nothing() {
    let mut view = EventLogView::with_retention(RetentionPolicy::KeepLatest(0));
    assert_eq!(view.append("a", Payload::new()), 0);
    assert_eq!(view.append("b", Payload::new()), 1);
    assert_eq!(view.record_count(), 0);
    assert_eq!(view.visible_count(), 0);
}

// ============================================================================
// Rendering & columns
// ============================================================================

#[test]
fn test_rendered_rows_cover_every_visible_record() {
    let names: Vec<String> = (0..30).map(|i| format!("event_{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut view = view_with_names(&refs);

    let rows = view.rendered_rows();
    assert_eq!(rows.len(), 30);
    assert_eq!(rows[0].sequence, 29);
    assert_eq!(rows.last().unwrap().sequence, 0);

    view.set_filter("event_2");
    let rows = view.rendered_rows();
    assert_eq!(rows.len(), 11);
    assert!(rows.iter().all(|row| row.name.starts_with("event_2")));
}

#[test]
fn test_columns_ignore_filtered_out_rows() {
    let mut view = view_with_names(&["ball", "a_much_longer_event_name"]);
    view.set_filter("ball");
    assert_eq!(view.columns().event, "Event".len());
}

#[test]
fn test_columns_sized_to_content() {
    let mut view = view_with_names(&["a"]);
    let widths = view.columns();
    assert_eq!(widths.event, "Event".len());
    assert_eq!(widths.data, "Data".len());

    view.append(
        "a_much_longer_event_name",
        payload(&[("number", json!(12345))]),
    );
    let widths = view.columns();
    assert_eq!(widths.event, "a_much_longer_event_name".len());
    assert_eq!(widths.data, "{number: 12345}".len());
}

// ============================================================================
// Hooks
// ============================================================================

#[test]
fn test_hooks_fire_after_changes() {
    let mut view = EventLogView::new();
    let rows = record(&mut view.on_rows_changed);
    let filters = record(&mut view.on_filter_changed);
    let sorts = record(&mut view.on_sort_changed);

    view.append("ball_started", Payload::new());
    view.append("switch_active", Payload::new());
    view.set_filter("ball");
    view.set_sort(SortOrder::NameAsc);

    assert_eq!(
        *rows.borrow(),
        vec![
            RowsChanged { total: 1, visible: 1 },
            RowsChanged { total: 2, visible: 2 },
            RowsChanged { total: 2, visible: 1 },
            RowsChanged { total: 2, visible: 1 },
        ]
    );
    assert_eq!(*filters.borrow(), vec!["ball".to_string()]);
    assert_eq!(*sorts.borrow(), vec![SortOrder::NameAsc]);
}
