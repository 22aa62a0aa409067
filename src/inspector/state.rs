//! Inspector value types and the size conversions shared by both inputs.
//!
//! `live_size` is the only source of truth. The slider (integer hundredths)
//! and the numeric field (absolute size) are pure projections of it, and a
//! slider position maps back through [`slider_to_size`]. Neither widget ever
//! feeds the other directly, so they cannot drift or loop.

use crate::constants::{SIZE_DECIMALS, SLIDER_SCALE};

/// Whether an entity is selected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InspectorState {
    NoSelection,
    HasSelection,
}

/// What the two size widgets should display
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeInputs {
    /// Slider position in hundredths
    pub slider: i32,
    /// Numeric field value
    pub spinbox: f32,
}

impl SizeInputs {
    pub fn from_size(size: f32) -> Self {
        Self {
            slider: size_to_slider(size),
            spinbox: size,
        }
    }
}

/// Slider position for a size
pub fn size_to_slider(size: f32) -> i32 {
    (size * SLIDER_SCALE).round() as i32
}

/// Size for a slider position
pub fn slider_to_size(position: i32) -> f32 {
    position as f32 / SLIDER_SCALE
}

/// Round a committed size to the stored precision
pub fn round_size(size: f32) -> f32 {
    let factor = 10f32.powi(SIZE_DECIMALS);
    (size * factor).round() / factor
}

/// JSON form of a rounded size, without f32 widening noise
pub fn size_to_json(size: f32) -> serde_json::Value {
    let factor = 10f64.powi(SIZE_DECIMALS);
    serde_json::Value::from((size as f64 * factor).round() / factor)
}

/// Which value a commit landed on
#[derive(Clone, Debug, PartialEq)]
pub enum CommitTarget {
    /// The selected entity, by name
    Entity(String),
    /// The process-wide default
    Default,
}

/// Payload of `on_size_committed`
#[derive(Clone, Debug, PartialEq)]
pub struct SizeCommitted {
    pub target: CommitTarget,
    pub size: f32,
}

/// Payload of `on_selection_changed`
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChanged {
    pub state: InspectorState,
    /// Group box title
    pub label: String,
}

/// Outcome of a cascade over the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Items that accepted the default, whether or not their size changed
    pub accepted: usize,
    /// Items without the capability
    pub skipped: usize,
    /// Items that failed and were passed over
    pub failed: usize,
}
