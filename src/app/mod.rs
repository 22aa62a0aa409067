//! Application module - the monitor state and how it is wired up.
//!
//! - `state` - the Monitor struct and its sub-structs
//! - `lifecycle` - construction, feed pumping and shutdown

mod lifecycle;
mod state;

pub use state::{EventsState, Monitor};
