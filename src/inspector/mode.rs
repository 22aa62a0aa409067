//! Inspector mode hand-off to the canvas.

/// Receives the inspector mode so the canvas can switch between
/// click-to-inspect and normal input handling.
pub trait ModeApplier {
    fn apply(&mut self, enabled: bool);
}

impl<F: FnMut(bool)> ModeApplier for F {
    fn apply(&mut self, enabled: bool) {
        self(enabled)
    }
}

/// Applier used until the canvas provides one
pub fn noop_applier(_enabled: bool) {}
