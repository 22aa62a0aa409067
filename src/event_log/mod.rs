//! Event log: append-only history plus a filtered, sorted view over it.
//!
//! - `model` - append-only storage and retention
//! - `filter` - case-insensitive wildcard name filter
//! - `projection` - ordering rules and projection maintenance
//! - `view` - the view-controller the UI binds to
//! - `feed` - single-consumer queue for multi-threaded transports

mod feed;
mod filter;
mod model;
pub mod projection;
mod view;

pub use feed::*;
pub use filter::*;
pub use model::*;
pub use view::*;
