//! Application state - the Monitor struct definition and sub-structs.

use crate::event_log::{EventFeed, EventLogView};
use crate::inspector::InspectorController;
use crate::settings::LocalSettings;

/// Event log window state
pub struct EventsState {
    /// Filter + sort controller
    pub view: EventLogView,
    /// Consumer side of the transport hand-off
    pub feed: EventFeed,
}

/// Both monitor windows plus their shared settings.
///
/// Everything here lives on the UI thread. Transports post through the
/// `FeedSender` returned by [`Monitor::new`] and the UI loop calls
/// [`Monitor::pump_feed`] once per tick.
pub struct Monitor {
    pub events: EventsState,
    pub inspector: InspectorController,
    /// Window placement and last sort order
    pub settings: LocalSettings,
}
