//! Application-wide constants.
//!
//! Centralizes magic numbers, config keys and window defaults so the
//! event log and inspector agree on them.

// ============================================================================
// Event Log
// ============================================================================

/// Payload key set by the transport on events that arrived over the
/// BCP channel. Stripped at append time, never stored or displayed.
pub const ORIGIN_CHANNEL_KEY: &str = "_from_bcp";

/// Header of the event name column
pub const EVENT_COLUMN_TITLE: &str = "Event";

/// Header of the payload column
pub const DATA_COLUMN_TITLE: &str = "Data";

/// Projection recomputes slower than this are logged
pub const SLOW_PROJECTION_MS: f64 = 8.0;

// ============================================================================
// Inspector
// ============================================================================

/// Default device size when the config store has none
pub const DEFAULT_DEVICE_SIZE: f32 = 0.07;

/// Decimal digits kept when a size is committed
pub const SIZE_DECIMALS: i32 = 3;

/// Slider positions per unit of size (slider works in hundredths)
pub const SLIDER_SCALE: f32 = 100.0;

/// Group box title shown when nothing is selected
pub const DEFAULT_DEVICE_LABEL: &str = "Default Device:";

// ============================================================================
// Configuration
// ============================================================================

/// Config key holding the process-wide default device size
pub const DEVICE_SIZE_KEY: &str = "device_size";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "playfield-monitor";

/// Shared config file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Per-machine window placement file name
pub const LOCAL_SETTINGS_FILE_NAME: &str = "local_settings.json";

// ============================================================================
// Window Defaults
// ============================================================================

/// Window identity of the event log
pub const EVENTS_WINDOW: &str = "events";

/// Window identity of the inspector
pub const INSPECTOR_WINDOW: &str = "inspector";

/// Default event log window position
pub const EVENTS_WINDOW_POS: (i32, i32) = (500, 200);

/// Default event log window size
pub const EVENTS_WINDOW_SIZE: (u32, u32) = (300, 600);

/// Default inspector window position
pub const INSPECTOR_WINDOW_POS: (i32, i32) = (1100, 500);

/// Default inspector window size
pub const INSPECTOR_WINDOW_SIZE: (u32, u32) = (300, 300);
