//! Monitor lifecycle - initialization, feed pumping and cleanup.

use super::{EventsState, Monitor};
use crate::canvas::Canvas;
use crate::error::MonitorResult;
use crate::event_log::{EventFeed, EventLogView, FeedSender, RetentionPolicy};
use crate::inspector::InspectorController;
use crate::settings::{ConfigStore, LocalSettings, WindowGeometry};
use crate::types::SortOrder;
use std::rc::Rc;
use tracing::{debug, info, warn};

impl Monitor {
    /// Build the monitor and the sender transports post events through.
    ///
    /// The event view starts with the sort order remembered in `settings`.
    pub fn new(
        canvas: Rc<dyn Canvas>,
        config: Box<dyn ConfigStore>,
        settings: LocalSettings,
        retention: RetentionPolicy,
    ) -> (Self, FeedSender) {
        let (sender, feed) = EventFeed::channel();

        let mut view = EventLogView::with_retention(retention);
        view.set_sort(settings.sort_order);

        let inspector = InspectorController::new(canvas, config);
        info!(
            sort = ?settings.sort_order,
            default_size = inspector.default_size(),
            "Monitor started"
        );

        let monitor = Self {
            events: EventsState { view, feed },
            inspector,
            settings,
        };
        (monitor, sender)
    }

    /// Move every pending event into the log. Call once per UI tick.
    pub fn pump_feed(&mut self) -> usize {
        self.events.feed.drain_into(&mut self.events.view)
    }

    /// Change the event order and remember it for the next start
    pub fn set_sort(&mut self, order: SortOrder) -> bool {
        let changed = self.events.view.set_sort(order);
        if changed {
            self.settings.sort_order = order;
        }
        changed
    }

    /// Where `window` should open
    pub fn window_geometry(&self, window: &str) -> WindowGeometry {
        self.settings.window(window)
    }

    /// Remember where `window` was when it closed and save right away.
    pub fn on_window_closed(&mut self, window: &str, geometry: WindowGeometry) -> MonitorResult<()> {
        debug!(window, ?geometry, "Window closed");
        self.settings.set_window(window, geometry);
        self.settings.save()
    }

    /// Turn inspection off and flush local settings
    pub fn shutdown(&mut self) {
        self.inspector.set_inspector_mode(false);
        if let Err(e) = self.settings.save() {
            warn!(error = %e, "Failed to save local settings");
        }
        info!(events = self.events.view.record_count(), "Monitor stopped");
    }
}
