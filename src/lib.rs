//! Live monitor for a playfield machine.
//!
//! Two cores sit behind a UI-agnostic surface:
//! - [`event_log`] - append-only event history with a filtered, sorted view
//! - [`inspector`] - selection-bound size editor with a cascading default
//!
//! The canvas, config store and window placement are reached through the
//! traits in [`canvas`] and [`settings`]. [`app::Monitor`] wires it all up.

pub mod app;
pub mod canvas;
pub mod constants;
pub mod error;
pub mod event_log;
pub mod hooks;
pub mod inspector;
pub mod perf;
pub mod settings;
pub mod types;
