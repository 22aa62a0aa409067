//! Contracts the monitor needs from the playfield canvas.
//!
//! The canvas owns the concrete device widgets and their hit-testing; the
//! inspector only talks to them through these traits. Everything lives on
//! the UI thread, so handles are `Rc<RefCell<..>>`.

use crate::error::EntityError;
use std::cell::RefCell;
use std::rc::Rc;

/// Anything placed on the canvas.
///
/// Items that cannot be resized keep the default implementation, which
/// reports the capability as unsupported so bulk operations can skip them.
pub trait CanvasItem {
    /// Apply `default_size` unless the item has an explicitly configured
    /// size. With `force`, the explicit size is cleared as well so the item
    /// follows the default from now on.
    fn resize_to_default(&mut self, default_size: f32, force: bool) -> Result<(), EntityError> {
        let _ = (default_size, force);
        Err(EntityError::Unsupported("resize_to_default"))
    }
}

/// A canvas item the inspector can select and resize.
pub trait SelectableEntity: CanvasItem {
    /// Identifying name shown in the inspector
    fn name(&self) -> String;

    /// Current size, as a fraction of the playfield
    fn size(&self) -> f32;

    fn set_size(&mut self, size: f32);

    /// Re-place the entity after a size change. With `save`, the entity
    /// persists its size to its own configuration.
    fn update_position(&mut self, save: bool);

    /// Remove the entity from the canvas
    fn destroy(&mut self);
}

pub type ItemHandle = Rc<RefCell<dyn CanvasItem>>;
pub type EntityHandle = Rc<RefCell<dyn SelectableEntity>>;

/// The playfield canvas
pub trait Canvas {
    /// Snapshot of every item currently on the canvas
    fn items(&self) -> Vec<ItemHandle>;

    /// Ask the canvas to re-layout after a size change
    fn request_resize_event(&self);
}

/// Whether two handles point at the same entity
pub fn same_entity(a: &EntityHandle, b: &EntityHandle) -> bool {
    Rc::ptr_eq(a, b)
}
