//! In-memory canvas engine.

use serde::{Deserialize, Serialize};

use crate::{
    CanvasEngine, CanvasObject, EditorError, EditorResult, ListenerId, ObjectId, SelectionEvent,
    SelectionEventKind, SelectionHandler, Size, ViewportTransform,
};

struct Listener {
    id: ListenerId,
    kind: SelectionEventKind,
    handler: SelectionHandler,
}

/// Selection listeners registered on a scene.
#[derive(Default)]
struct Listeners {
    entries: Vec<Listener>,
    next_id: u64,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// A scene holding the canvas objects, selection and viewport.
///
/// Selection changes made through [`Scene::select`] or the
/// [`CanvasEngine`] methods emit the matching [`SelectionEvent`] to
/// subscribed listeners. Listeners are not serialized.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Scene {
    /// All objects, bottom to top.
    objects: Vec<CanvasObject>,
    /// Currently selected object IDs.
    selected: Vec<ObjectId>,
    /// Drawing surface size.
    pub dimensions: Size,
    /// Viewport transform.
    pub viewport: ViewportTransform,
    /// Object the rendering is clipped to.
    clip_path: Option<ObjectId>,
    /// Redraws requested so far.
    #[serde(skip)]
    render_requests: u64,
    #[serde(skip)]
    listeners: Listeners,
}

impl Scene {
    /// Create a new empty scene with the given surface size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            dimensions: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Replace the selection with `ids`, as a user click or drag would.
    ///
    /// Emits `selection:created` when going from nothing to something,
    /// `selection:updated` when the set changes, and `selection:cleared`
    /// when `ids` is empty and something was selected.
    ///
    /// # Errors
    ///
    /// Returns an error if any ID is not in the scene; the selection is
    /// left unchanged.
    pub fn select(&mut self, ids: &[ObjectId]) -> EditorResult<()> {
        if let Some(missing) = ids.iter().find(|id| self.object(**id).is_none()) {
            return Err(EditorError::ObjectNotFound(missing.to_string()));
        }

        let mut next = Vec::with_capacity(ids.len());
        for id in ids {
            if !next.contains(id) {
                next.push(*id);
            }
        }
        if next == self.selected {
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.selected, next.clone());
        let event = if next.is_empty() {
            SelectionEvent::Cleared {
                deselected: previous,
            }
        } else if previous.is_empty() {
            SelectionEvent::Created { selected: next }
        } else {
            let deselected = previous
                .into_iter()
                .filter(|id| !next.contains(id))
                .collect();
            SelectionEvent::Updated {
                selected: next,
                deselected,
            }
        };
        self.emit(&event);
        Ok(())
    }

    /// Deliver an event to every listener subscribed to its kind.
    pub fn emit(&mut self, event: &SelectionEvent) {
        let kind = event.kind();
        tracing::trace!("Emitting {kind}");
        for listener in &mut self.listeners.entries {
            if listener.kind == kind {
                (listener.handler)(event);
            }
        }
    }

    /// Number of subscribed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.entries.len()
    }

    /// Redraws requested since creation.
    #[must_use]
    pub const fn render_requests(&self) -> u64 {
        self.render_requests
    }

    /// Get the number of objects in the scene.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string(self).map_err(EditorError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(EditorError::Serialization)
    }
}

impl CanvasEngine for Scene {
    fn set_dimensions(&mut self, size: Size) {
        self.dimensions = size;
    }

    fn dimensions(&self) -> Size {
        self.dimensions
    }

    fn viewport_transform(&self) -> ViewportTransform {
        self.viewport
    }

    fn set_viewport_transform(&mut self, transform: ViewportTransform) {
        self.viewport = transform;
    }

    fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    fn add(&mut self, object: CanvasObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        id
    }

    fn remove(&mut self, id: ObjectId) -> EditorResult<CanvasObject> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| EditorError::ObjectNotFound(id.to_string()))?;
        if self.selected.contains(&id) {
            let remaining: Vec<_> = self.selected.iter().copied().filter(|s| *s != id).collect();
            self.select(&remaining)?;
        }
        if self.clip_path == Some(id) {
            self.clip_path = None;
        }
        Ok(self.objects.remove(index))
    }

    fn active_objects(&self) -> Vec<ObjectId> {
        self.selected.clone()
    }

    fn set_active_object(&mut self, id: ObjectId) -> EditorResult<()> {
        self.select(&[id])
    }

    fn discard_active_object(&mut self) {
        if !self.selected.is_empty() {
            let deselected = std::mem::take(&mut self.selected);
            self.emit(&SelectionEvent::Cleared { deselected });
        }
    }

    fn on(&mut self, kind: SelectionEventKind, handler: SelectionHandler) -> ListenerId {
        let id = ListenerId(self.listeners.next_id);
        self.listeners.next_id += 1;
        self.listeners.entries.push(Listener { id, kind, handler });
        id
    }

    fn off(&mut self, listener: ListenerId) -> bool {
        let before = self.listeners.entries.len();
        self.listeners.entries.retain(|l| l.id != listener);
        self.listeners.entries.len() != before
    }

    fn clip_path(&self) -> Option<ObjectId> {
        self.clip_path
    }

    fn set_clip_path(&mut self, clip: Option<ObjectId>) {
        self.clip_path = clip;
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}
