//! Inspector: single-selection size editor for canvas entities.
//!
//! - `state` - value types and the slider/field conversions
//! - `controller` - selection, live preview, commit and default cascade
//! - `mode` - inspector mode hand-off to the canvas

mod controller;
mod mode;
mod state;

pub use controller::InspectorController;
pub use mode::{ModeApplier, noop_applier};
pub use state::*;
