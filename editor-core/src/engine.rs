//! The seam between the editor and the canvas engine that renders it.

use crate::{
    CanvasObject, EditorResult, ListenerId, ObjectId, Point, SelectionEventKind,
    SelectionHandler, Size, ViewportTransform,
};

/// Operations the editor needs from a 2D canvas engine.
///
/// Rendering, hit-testing and pointer handling stay inside the engine; the
/// editor only reads and mutates the object list, the selection and the
/// viewport. [`crate::Scene`] is the in-memory implementation.
pub trait CanvasEngine {
    /// Resize the drawing surface.
    fn set_dimensions(&mut self, size: Size);

    /// Current surface size.
    fn dimensions(&self) -> Size;

    /// Current viewport transform.
    fn viewport_transform(&self) -> ViewportTransform;

    /// Replace the viewport transform.
    fn set_viewport_transform(&mut self, transform: ViewportTransform);

    /// Set the zoom to `zoom`, keeping `point` fixed on screen.
    fn zoom_to_point(&mut self, point: Point, zoom: f64) {
        let mut transform = self.viewport_transform();
        transform.zoom_to_point(point, zoom);
        self.set_viewport_transform(transform);
    }

    /// All objects, bottom to top.
    fn objects(&self) -> &[CanvasObject];

    /// Mutable access to one object.
    fn object_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject>;

    /// Look up one object.
    fn object(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects().iter().find(|o| o.id == id)
    }

    /// First object tagged with `name`.
    fn find_by_name(&self, name: &str) -> Option<&CanvasObject> {
        self.objects().iter().find(|o| o.has_name(name))
    }

    /// Add an object on top of the stack.
    fn add(&mut self, object: CanvasObject) -> ObjectId;

    /// Remove an object, dropping it from the selection too.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::ObjectNotFound`] if no such object exists.
    fn remove(&mut self, id: ObjectId) -> EditorResult<CanvasObject>;

    /// Currently selected objects, in selection order.
    fn active_objects(&self) -> Vec<ObjectId>;

    /// Make `id` the only selected object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::ObjectNotFound`] if no such object exists.
    fn set_active_object(&mut self, id: ObjectId) -> EditorResult<()>;

    /// Clear the selection.
    fn discard_active_object(&mut self);

    /// Subscribe to one selection lifecycle event.
    fn on(&mut self, kind: SelectionEventKind, handler: SelectionHandler) -> ListenerId;

    /// Remove one listener. Returns whether it was subscribed.
    fn off(&mut self, listener: ListenerId) -> bool;

    /// Object the rendering is clipped to.
    fn clip_path(&self) -> Option<ObjectId>;

    /// Clip rendering to an object, or stop clipping.
    fn set_clip_path(&mut self, clip: Option<ObjectId>);

    /// Move `object` so its center sits on `center`.
    fn center_object(&self, object: &mut CanvasObject, center: Point) {
        object.set_center_point(center);
    }

    /// Schedule a redraw.
    fn request_render(&mut self);

    /// Center of the drawing surface.
    fn center(&self) -> Point {
        self.dimensions().center()
    }
}
