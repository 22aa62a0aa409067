//! Selection-bound size editor.
//!
//! ## State Transitions
//!
//! ```text
//! NoSelection  -> HasSelection   (select, inspector mode on)
//! HasSelection -> HasSelection   (select another entity)
//! HasSelection -> NoSelection    (deselect, destroy_selected, mode toggled off,
//!                                 selected entity destroyed by the canvas)
//! ```
//!
//! With a selection every edit targets that entity. Without one, commits
//! change the process-wide default size and cascade it to entities that
//! have no explicit size; previews only move the displayed value.

use super::mode::{ModeApplier, noop_applier};
use super::state::{
    CascadeReport, CommitTarget, InspectorState, SelectionChanged, SizeCommitted, SizeInputs,
    round_size, size_to_json, slider_to_size,
};
use crate::canvas::{Canvas, EntityHandle, SelectableEntity, same_entity};
use crate::constants::{DEFAULT_DEVICE_LABEL, DEVICE_SIZE_KEY};
use crate::error::EntityError;
use crate::hooks::Hook;
use crate::settings::{ConfigStore, read_device_size};
use std::rc::Rc;
use tracing::{debug, info, warn};

pub struct InspectorController {
    canvas: Rc<dyn Canvas>,
    config: Box<dyn ConfigStore>,
    mode_applier: Box<dyn ModeApplier>,
    enabled: bool,
    selected: Option<EntityHandle>,
    /// Value shown in both size inputs
    live_size: f32,
    /// Size last applied to the selected entity
    committed_size: Option<f32>,
    /// Process-wide fallback size
    default_size: f32,
    label: String,
    /// Fired on every selection state change
    pub on_selection_changed: Hook<SelectionChanged>,
    /// Fired whenever the size inputs must be redrawn
    pub on_size_inputs_changed: Hook<SizeInputs>,
    /// Fired after a commit was applied
    pub on_size_committed: Hook<SizeCommitted>,
    /// Fired with the new inspector mode
    pub on_mode_changed: Hook<bool>,
}

impl InspectorController {
    /// Create an inspector with no selection, showing the configured default.
    pub fn new(canvas: Rc<dyn Canvas>, config: Box<dyn ConfigStore>) -> Self {
        let default_size = read_device_size(config.as_ref());
        Self {
            canvas,
            config,
            mode_applier: Box::new(noop_applier),
            enabled: false,
            selected: None,
            live_size: default_size,
            committed_size: None,
            default_size,
            label: DEFAULT_DEVICE_LABEL.to_string(),
            on_selection_changed: Hook::new(),
            on_size_inputs_changed: Hook::new(),
            on_size_committed: Hook::new(),
            on_mode_changed: Hook::new(),
        }
    }

    /// Install the callback that switches the canvas input mode
    pub fn with_mode_applier(mut self, applier: impl ModeApplier + 'static) -> Self {
        self.mode_applier = Box::new(applier);
        self
    }

    // ==================== Selection ====================

    /// Bind the editor to `entity`, loading its size into both values.
    /// Ignored while inspector mode is off.
    pub fn select(&mut self, entity: EntityHandle) {
        if !self.enabled {
            info!("Inspector mode is off, selection ignored");
            return;
        }
        if let Some(current) = &self.selected {
            if same_entity(current, &entity) {
                return;
            }
        }

        let (name, size) = match entity.try_borrow() {
            Ok(e) => (e.name(), e.size()),
            Err(_) => {
                warn!("Entity is busy, selection ignored");
                return;
            }
        };

        self.revert_preview();
        debug!(entity = %name, size, "Entity selected");
        self.selected = Some(entity);
        self.live_size = size;
        self.committed_size = Some(size);
        self.label = format!("\"{}\" Size:", name);
        self.emit_selection();
        self.emit_inputs();
    }

    /// Drop the selection and show the default size again.
    pub fn deselect(&mut self) {
        self.revert_preview();
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            debug!("Selection cleared");
        }
        self.committed_size = None;
        self.live_size = self.default_size;
        self.label = DEFAULT_DEVICE_LABEL.to_string();
        self.emit_selection();
        self.emit_inputs();
    }

    /// Put an abandoned live preview back to the committed size
    fn revert_preview(&mut self) {
        let (Some(entity), Some(committed)) = (self.selected.clone(), self.committed_size) else {
            return;
        };
        if self.live_size == committed {
            return;
        }
        let reverted = with_entity(&entity, |e| {
            e.set_size(committed);
            e.update_position(false);
        });
        if reverted.is_some() {
            self.canvas.request_resize_event();
        }
    }

    /// Destroy the selected entity, then deselect.
    pub fn destroy_selected(&mut self) {
        let Some(entity) = self.selected.clone() else {
            info!("No device selected to delete");
            return;
        };
        with_entity(&entity, |e| e.destroy());
        self.clear_selection();
    }

    /// The canvas destroyed `entity` on its own. Clears the selection if it
    /// was the selected one.
    pub fn entity_destroyed(&mut self, entity: &EntityHandle) {
        if self
            .selected
            .as_ref()
            .is_some_and(|current| same_entity(current, entity))
        {
            self.clear_selection();
        }
    }

    // ==================== Size Editing ====================

    /// Live preview while dragging. Applies the size to the selected entity
    /// without saving; with no selection only the displayed value moves.
    pub fn preview_resize(&mut self, new_size: f32) {
        if !new_size.is_finite() {
            debug!(new_size, "Ignoring non-finite preview size");
            return;
        }
        self.live_size = new_size;
        self.emit_inputs();

        if let Some(entity) = self.selected.clone() {
            with_entity(&entity, |e| {
                e.set_size(new_size);
                e.update_position(false);
            });
            self.canvas.request_resize_event();
        }
    }

    /// Apply a size. Rounded to 3 decimals.
    ///
    /// With a selection the entity is resized and saves its size. Without
    /// one the default size changes, is written to config, cascades to
    /// unconfigured entities and is persisted.
    pub fn commit_resize(&mut self, new_size: f32) {
        if !new_size.is_finite() {
            warn!(new_size, "Ignoring non-finite size");
            return;
        }
        let size = round_size(new_size);
        self.live_size = size;
        self.emit_inputs();

        let target = match self.selected.clone() {
            Some(entity) => {
                self.committed_size = Some(size);
                let name = with_entity(&entity, |e| {
                    e.set_size(size);
                    e.update_position(true);
                    e.name()
                });
                self.canvas.request_resize_event();
                debug!(size, "Entity size committed");
                CommitTarget::Entity(name.unwrap_or_default())
            }
            None => {
                self.default_size = size;
                self.config.set(DEVICE_SIZE_KEY, size_to_json(size));
                self.cascade_default_to_unconfigured();
                self.canvas.request_resize_event();
                if let Err(e) = self.config.persist() {
                    warn!(error = %e, "Failed to save default device size");
                }
                info!(size, "Default device size changed");
                CommitTarget::Default
            }
        };

        self.on_size_committed.emit(&SizeCommitted { target, size });
    }

    /// Re-apply the default size to every canvas item without an explicit
    /// size. Items lacking the capability or failing are skipped.
    pub fn cascade_default_to_unconfigured(&mut self) -> CascadeReport {
        let mut report = CascadeReport::default();

        for item in self.canvas.items() {
            let result = match item.try_borrow_mut() {
                Ok(mut item) => item.resize_to_default(self.default_size, false),
                Err(_) => Err(EntityError::Busy),
            };
            match result {
                Ok(()) => report.accepted += 1,
                Err(EntityError::Unsupported(_)) => report.skipped += 1,
                Err(e) => {
                    info!(error = %e, "Skipping item during cascade");
                    report.failed += 1;
                }
            }
        }

        debug!(
            accepted = report.accepted,
            skipped = report.skipped,
            failed = report.failed,
            "Default size cascaded"
        );
        report
    }

    /// Put the selected entity back on the default size and forget its
    /// explicit size.
    pub fn force_reset_selected_to_default(&mut self) {
        let Some(entity) = self.selected.clone() else {
            info!("No device selected to resize");
            return;
        };

        let default_size = self.default_size;
        self.preview_resize(default_size);

        let result = match entity.try_borrow_mut() {
            Ok(mut e) => e.resize_to_default(default_size, true),
            Err(_) => Err(EntityError::Busy),
        };
        match result {
            Ok(()) => self.committed_size = Some(default_size),
            Err(e) => info!(error = %e, "Selected entity kept its stored size"),
        }
    }

    // ==================== Widget Entry Points ====================

    /// Slider moved to `position` (hundredths)
    pub fn slider_moved(&mut self, position: i32) {
        self.preview_resize(slider_to_size(position));
    }

    /// Slider released: commit what it shows
    pub fn slider_released(&mut self) {
        self.commit_resize(self.live_size);
    }

    /// Numeric field edited
    pub fn spinbox_changed(&mut self, value: f32) {
        self.commit_resize(value);
    }

    // ==================== Inspector Mode ====================

    /// Flip inspector mode. Turning it off clears the selection before the
    /// canvas hears about the change.
    pub fn toggle_inspector_mode(&mut self) {
        self.set_inspector_mode(!self.enabled);
    }

    pub fn set_inspector_mode(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.deselect();
        }
        self.mode_applier.apply(enabled);
        debug!(enabled, "Inspector mode toggled");
        self.on_mode_changed.emit(&enabled);
    }

    // ==================== Reads ====================

    pub fn state(&self) -> InspectorState {
        if self.selected.is_some() {
            InspectorState::HasSelection
        } else {
            InspectorState::NoSelection
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn selected(&self) -> Option<&EntityHandle> {
        self.selected.as_ref()
    }

    pub fn live_size(&self) -> f32 {
        self.live_size
    }

    pub fn committed_size(&self) -> Option<f32> {
        self.committed_size
    }

    pub fn default_size(&self) -> f32 {
        self.default_size
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size_inputs(&self) -> SizeInputs {
        SizeInputs::from_size(self.live_size)
    }

    pub fn config(&self) -> &dyn ConfigStore {
        self.config.as_ref()
    }

    fn emit_selection(&mut self) {
        let change = SelectionChanged {
            state: self.state(),
            label: self.label.clone(),
        };
        self.on_selection_changed.emit(&change);
    }

    fn emit_inputs(&mut self) {
        let inputs = self.size_inputs();
        self.on_size_inputs_changed.emit(&inputs);
    }
}

/// Run `f` on the entity, or log and skip if it is borrowed elsewhere
fn with_entity<R>(entity: &EntityHandle, f: impl FnOnce(&mut dyn SelectableEntity) -> R) -> Option<R> {
    match entity.try_borrow_mut() {
        Ok(mut e) => Some(f(&mut *e)),
        Err(_) => {
            warn!("Selected entity is busy");
            None
        }
    }
}
