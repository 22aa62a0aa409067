//! Error types for the monitor.
//!
//! Nothing in the event log or the inspector is fatal. Errors only surface
//! from settings IO and from individual canvas entities, where the caller
//! decides whether to skip or log them.

use thiserror::Error;

/// Errors from loading or saving configuration
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Temp file could not be moved over the target
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The platform has no config directory
    #[error("No config directory available")]
    NoConfigDir,
}

/// Errors from a single canvas entity.
///
/// `Unsupported` and `Busy` are produced by the monitor itself. Canvas
/// implementors return `Destroyed` or `Other` from their entity methods;
/// the inspector and the cascade log them and move on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    /// The item does not support the requested capability
    #[error("{0} is not supported by this item")]
    Unsupported(&'static str),

    /// The item is already borrowed elsewhere
    #[error("Item is busy")]
    Busy,

    /// The entity was removed from the canvas while still referenced
    #[error("Entity {0} was destroyed")]
    Destroyed(String),

    /// Any other failure reported by the canvas driver
    #[error("{0}")]
    Other(String),
}

/// Result type alias for settings operations
pub type MonitorResult<T> = Result<T, SettingsError>;
