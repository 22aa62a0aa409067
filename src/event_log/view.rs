//! Event log view-controller.
//!
//! Holds the current filter text and sort order over an [`EventLog`] and
//! keeps the projection current: filter and sort changes recompute it
//! within the call, appends patch it in place. Row rendering and column
//! sizing are done on read.

use super::filter::NameFilter;
use super::model::{EventLog, RetentionPolicy};
use super::projection;
use crate::constants::{DATA_COLUMN_TITLE, EVENT_COLUMN_TITLE, SLOW_PROJECTION_MS};
use crate::hooks::Hook;
use crate::perf::{OperationStats, ScopedTimer, measure};
use crate::types::{EventRecord, Payload, SortOrder};
use tracing::debug;

/// One rendered table row
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EventRow {
    pub sequence: u64,
    pub name: String,
    pub data: String,
}

impl EventRow {
    fn from_record(record: &EventRecord) -> Self {
        Self {
            sequence: record.sequence,
            name: record.name.clone(),
            data: record.data_text(),
        }
    }
}

/// Widths of the two presentation columns, in characters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnWidths {
    pub event: usize,
    pub data: usize,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            event: EVENT_COLUMN_TITLE.chars().count(),
            data: DATA_COLUMN_TITLE.chars().count(),
        }
    }
}

/// Payload of `on_rows_changed`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowsChanged {
    /// Records in the log
    pub total: usize,
    /// Records passing the filter
    pub visible: usize,
}

/// Filter + sort controller over the event log
pub struct EventLogView {
    log: EventLog,
    filter_text: String,
    filter: NameFilter,
    sort: SortOrder,
    /// Positions into `log`, in display order
    rows: Vec<usize>,
    columns: ColumnWidths,
    columns_dirty: bool,
    projection_stats: OperationStats,
    /// Fired with the new filter text after the view re-rendered
    pub on_filter_changed: Hook<String>,
    /// Fired with the new order after the view re-rendered
    pub on_sort_changed: Hook<SortOrder>,
    /// Fired after every append, filter change and sort change
    pub on_rows_changed: Hook<RowsChanged>,
}

impl Default for EventLogView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogView {
    pub fn new() -> Self {
        Self::with_log(EventLog::new())
    }

    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self::with_log(EventLog::with_retention(retention))
    }

    fn with_log(log: EventLog) -> Self {
        let mut view = Self {
            log,
            filter_text: String::new(),
            filter: NameFilter::All,
            sort: SortOrder::default(),
            rows: Vec::new(),
            columns: ColumnWidths::default(),
            columns_dirty: true,
            projection_stats: OperationStats::default(),
            on_filter_changed: Hook::new(),
            on_sort_changed: Hook::new(),
            on_rows_changed: Hook::new(),
        };
        view.recompute();
        view
    }

    // ==================== Operations ====================

    /// Append an event and patch the projection. Returns its sequence.
    pub fn append(&mut self, name: impl Into<String>, payload: Payload) -> u64 {
        let appended = self.log.append(name, payload);

        if appended.evicted > 0 {
            projection::evict_front(&mut self.rows, appended.evicted);
        }
        // A zero-size retention cap evicts the new record immediately
        if let Some(pos) = self.log.record_count().checked_sub(1) {
            projection::insert(&mut self.rows, &self.log, pos, &self.filter, self.sort);
        }

        self.after_change();
        appended.sequence
    }

    /// Set the search text. Re-renders before returning.
    pub fn set_filter(&mut self, text: &str) {
        self.filter_text = text.to_string();
        self.filter = NameFilter::new(text);
        self.recompute();
        self.after_change();
        self.on_filter_changed.emit(&self.filter_text);
    }

    /// Set the display order. The disabled placeholder is refused and
    /// leaves the view unchanged.
    pub fn set_sort(&mut self, order: SortOrder) -> bool {
        if !order.is_selectable() {
            debug!(order = ?order, "Ignoring non-selectable sort order");
            return false;
        }
        self.sort = order;
        self.recompute();
        self.after_change();
        self.on_sort_changed.emit(&self.sort);
        true
    }

    /// Recompute the projection from scratch and re-render.
    pub fn refresh(&mut self) {
        self.recompute();
        self.after_change();
    }

    fn recompute(&mut self) {
        let _timer = if cfg!(feature = "profiling") {
            ScopedTimer::for_profiling("event_log.project")
        } else {
            ScopedTimer::new("event_log.project", SLOW_PROJECTION_MS)
        };
        let (rows, elapsed_ms) = measure(|| projection::project(&self.log, &self.filter, self.sort));
        self.rows = rows;
        self.projection_stats.record(elapsed_ms);
    }

    fn after_change(&mut self) {
        self.columns_dirty = true;
        let change = RowsChanged {
            total: self.log.record_count(),
            visible: self.rows.len(),
        };
        self.on_rows_changed.emit(&change);
    }

    // ==================== Reads ====================

    /// Total number of stored records
    pub fn record_count(&self) -> usize {
        self.log.record_count()
    }

    /// Number of records passing the filter
    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }

    /// All filtered records in display order
    pub fn rows(&self) -> impl Iterator<Item = &EventRecord> {
        self.rows.iter().map(|&pos| &self.log[pos])
    }

    /// Sequences of all filtered records in display order
    pub fn sequences(&self) -> Vec<u64> {
        self.rows().map(|record| record.sequence).collect()
    }

    /// Every filtered row rendered for display, in display order
    pub fn rendered_rows(&self) -> Vec<EventRow> {
        self.rows().map(EventRow::from_record).collect()
    }

    /// Column widths sized to the filtered rows
    pub fn columns(&mut self) -> ColumnWidths {
        if self.columns_dirty {
            self.columns = self.measure_columns();
            self.columns_dirty = false;
        }
        self.columns
    }

    fn measure_columns(&self) -> ColumnWidths {
        self.rows().fold(ColumnWidths::default(), |widths, record| ColumnWidths {
            event: widths.event.max(record.name.chars().count()),
            data: widths.data.max(record.data_text().chars().count()),
        })
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn projection_stats(&self) -> &OperationStats {
        &self.projection_stats
    }
}
