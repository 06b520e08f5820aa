//! The editor session: one owner for the canvas and everything that
//! touches it.
//!
//! ```text
//!   container resize ──► AutoResize ──► fit ──┐
//!   toolbar command  ──► Editor ──────────────┼──► CanvasEngine
//!   selection event  ◄── SelectionTracker ◄───┘
//!          │
//!          ▼
//!   selected_objects()
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{EditorConfig, StyleDefaults};
use crate::viewport::{AutoResize, FitOutcome};
use crate::{
    CanvasEngine, CanvasObject, Editor, EditorResult, ObjectId, ObjectKind, SelectionSink,
    SelectionTracker, Size,
};

/// Owns a canvas and coordinates fitting, selection tracking and editing.
#[derive(Debug)]
pub struct EditorSession<E: CanvasEngine> {
    canvas: E,
    config: EditorConfig,
    style: StyleDefaults,
    resize: AutoResize,
    tracker: SelectionTracker,
    selection: Rc<RefCell<Vec<ObjectId>>>,
}

impl<E: CanvasEngine> EditorSession<E> {
    /// Set up `canvas` inside a container of `container` pixels.
    ///
    /// Creates the workspace rectangle (replacing any stale one), makes it
    /// the clip path, starts tracking selection and fits the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::InvalidConfig`] if `config` does not
    /// validate.
    pub fn init(mut canvas: E, container: Size, config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        canvas.set_dimensions(container);
        install_workspace(&mut canvas, &config);

        let selection = Rc::new(RefCell::new(canvas.active_objects()));
        let mut tracker = SelectionTracker::new(selection_sink(&selection));
        tracker.attach(&mut canvas)?;

        let mut resize = AutoResize::new(config.zoom_ratio, config.workspace.name.clone());
        resize.observe(&mut canvas, container);

        tracing::info!(
            "Editor session ready: workspace {}x{} in {}x{} container",
            config.workspace.width,
            config.workspace.height,
            container.width,
            container.height
        );
        Ok(Self {
            canvas,
            style: config.style.clone(),
            config,
            resize,
            tracker,
            selection,
        })
    }

    /// Forward a container size notification.
    ///
    /// Returns `None` once the container has been detached.
    pub fn resize(&mut self, size: Size) -> Option<FitOutcome> {
        self.resize.observe(&mut self.canvas, size)
    }

    /// Observe a different container, or none.
    ///
    /// The previous observer is disconnected first; a new one fits
    /// immediately to `container`.
    pub fn set_container(&mut self, container: Option<Size>) -> Option<FitOutcome> {
        self.resize.disconnect();
        let container = container?;
        self.resize = AutoResize::new(self.config.zoom_ratio, self.config.workspace.name.clone());
        self.resize.observe(&mut self.canvas, container)
    }

    /// Borrow the command facade.
    pub fn editor(&mut self) -> Editor<'_, E> {
        Editor::new(
            &mut self.canvas,
            &mut self.style,
            &self.config.shapes,
            &self.config.workspace.name,
        )
    }

    /// The selection as last published by the canvas.
    #[must_use]
    pub fn selected_objects(&self) -> Vec<ObjectId> {
        self.selection.borrow().clone()
    }

    /// The workspace rectangle.
    #[must_use]
    pub fn workspace(&self) -> Option<&CanvasObject> {
        self.canvas.find_by_name(&self.config.workspace.name)
    }

    /// The canvas.
    #[must_use]
    pub const fn canvas(&self) -> &E {
        &self.canvas
    }

    /// Mutable access to the canvas, for user interaction the engine
    /// itself would handle (clicks, drags).
    pub fn canvas_mut(&mut self) -> &mut E {
        &mut self.canvas
    }

    /// Current style defaults.
    #[must_use]
    pub const fn style(&self) -> &StyleDefaults {
        &self.style
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Whether container resizes still refit the canvas.
    #[must_use]
    pub const fn is_observing_container(&self) -> bool {
        self.resize.is_connected()
    }

    /// Swap in a new canvas and return the old one, fully detached.
    ///
    /// The new canvas gets its own workspace. If a container is still
    /// observed, the new canvas is fitted to its last size and observation
    /// continues; otherwise it stays unobserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection tracker cannot subscribe to the
    /// new canvas.
    pub fn replace_canvas(&mut self, mut canvas: E) -> EditorResult<E> {
        let container = if self.resize.is_connected() {
            self.resize.last_size()
        } else {
            None
        };
        self.resize.disconnect();

        if let Some(size) = container {
            canvas.set_dimensions(size);
        }
        install_workspace(&mut canvas, &self.config);
        self.tracker.reattach(&mut self.canvas, &mut canvas)?;
        *self.selection.borrow_mut() = canvas.active_objects();
        let old = std::mem::replace(&mut self.canvas, canvas);

        self.resize = AutoResize::new(self.config.zoom_ratio, self.config.workspace.name.clone());
        match container {
            Some(size) => {
                self.resize.observe(&mut self.canvas, size);
            }
            None => self.resize.disconnect(),
        }
        tracing::debug!("Canvas replaced");
        Ok(old)
    }

    /// End the session, releasing the observer and listeners, and hand
    /// back the canvas.
    pub fn teardown(mut self) -> E {
        self.resize.disconnect();
        self.tracker.detach(&mut self.canvas);
        self.selection.borrow_mut().clear();
        tracing::debug!("Editor session torn down");
        self.canvas
    }
}

fn selection_sink(selection: &Rc<RefCell<Vec<ObjectId>>>) -> SelectionSink {
    let selection = Rc::clone(selection);
    Rc::new(move |ids: Vec<ObjectId>| *selection.borrow_mut() = ids)
}

/// Put exactly one workspace rectangle on `canvas`, centered on the
/// surface, and clip to it.
fn install_workspace<E: CanvasEngine + ?Sized>(canvas: &mut E, config: &EditorConfig) -> ObjectId {
    let workspace = &config.workspace;
    let stale: Vec<_> = canvas
        .objects()
        .iter()
        .filter(|o| o.has_name(&workspace.name))
        .map(|o| o.id)
        .collect();
    for id in stale {
        if canvas.remove(id).is_ok() {
            tracing::debug!("Removed stale workspace {id}");
        }
    }

    let mut object = CanvasObject::new(
        ObjectKind::Rect { rx: 0.0, ry: 0.0 },
        workspace.width,
        workspace.height,
    )
    .with_name(workspace.name.clone());
    object.fill.clone_from(&workspace.fill);
    object.stroke_width = 0.0;
    object.selectable = false;
    object.has_controls = false;
    object.shadow = Some(workspace.shadow.clone());

    let center = canvas.center();
    canvas.center_object(&mut object, center);
    let id = canvas.add(object);
    canvas.set_clip_path(Some(id));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorError, Scene, ShapeKind};

    const EPSILON: f64 = 1e-9;

    fn session() -> EditorSession<Scene> {
        EditorSession::init(
            Scene::new(0.0, 0.0),
            Size::new(1200.0, 800.0),
            EditorConfig::default(),
        )
        .expect("init")
    }

    #[test]
    fn init_creates_single_clipped_workspace() {
        let session = session();
        let workspace = session.workspace().expect("workspace");

        assert!(!workspace.selectable);
        assert!(!workspace.has_controls);
        assert_eq!(workspace.fill, "white");
        assert_eq!(session.canvas().clip_path(), Some(workspace.id));
        let count = session
            .canvas()
            .objects()
            .iter()
            .filter(|o| o.has_name("clip"))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn init_replaces_stale_workspace() {
        let mut scene = Scene::new(0.0, 0.0);
        scene.add(
            CanvasObject::new(ObjectKind::Rect { rx: 0.0, ry: 0.0 }, 5.0, 5.0).with_name("clip"),
        );

        let session = EditorSession::init(scene, Size::new(800.0, 600.0), EditorConfig::default())
            .expect("init");
        assert_eq!(session.canvas().object_count(), 1);
        assert!((session.workspace().expect("workspace").width - 900.0).abs() < EPSILON);
    }

    #[test]
    fn init_fits_viewport_to_container() {
        let session = session();
        let zoom = session.canvas().viewport.scale_x();
        let expected = 0.95 * (1200.0_f64 / 900.0).min(800.0 / 1200.0);
        assert!((zoom - expected).abs() < EPSILON);
        assert_eq!(session.canvas().dimensions, Size::new(1200.0, 800.0));
    }

    #[test]
    fn init_rejects_invalid_config() {
        let config = EditorConfig {
            zoom_ratio: 0.0,
            ..EditorConfig::default()
        };
        let result = EditorSession::init(Scene::default(), Size::new(10.0, 10.0), config);
        assert!(matches!(result, Err(EditorError::InvalidConfig(_))));
    }

    #[test]
    fn added_shape_is_published_as_selection() {
        let mut session = session();
        let id = session.editor().add_shape(ShapeKind::Diamond).expect("add");
        assert_eq!(session.selected_objects(), vec![id]);

        session.canvas_mut().discard_active_object();
        assert!(session.selected_objects().is_empty());
    }

    #[test]
    fn style_changes_persist_across_commands() {
        let mut session = session();
        session.editor().change_fill_color("#ff0000");
        let id = session.editor().add_circle().expect("add");

        assert_eq!(session.style().fill_color, "#ff0000");
        assert_eq!(session.canvas().object(id).expect("circle").fill, "#ff0000");
    }

    #[test]
    fn set_container_none_stops_refitting() {
        let mut session = session();
        assert!(session.set_container(None).is_none());
        assert!(!session.is_observing_container());
        assert!(session.resize(Size::new(300.0, 300.0)).is_none());

        let outcome = session.set_container(Some(Size::new(300.0, 300.0)));
        assert!(matches!(outcome, Some(FitOutcome::Fitted { .. })));
        assert!(session.is_observing_container());
    }

    #[test]
    fn replace_canvas_moves_listeners_and_workspace() {
        let mut session = session();
        session.editor().add_triangle().expect("add");

        let old = session.replace_canvas(Scene::new(0.0, 0.0)).expect("replace");
        assert_eq!(old.listener_count(), 0);
        assert_eq!(session.canvas().listener_count(), 3);
        assert!(session.selected_objects().is_empty());
        assert!(session.workspace().is_some());
        assert_eq!(session.canvas().dimensions, Size::new(1200.0, 800.0));
    }

    #[test]
    fn replace_canvas_without_container_stays_unobserved() {
        let mut session = session();
        session.set_container(None);

        session.replace_canvas(Scene::default()).expect("replace");
        assert!(!session.is_observing_container());
        assert!(session.resize(Size::new(640.0, 480.0)).is_none());
        assert_eq!(session.canvas().dimensions, Size::default());
        assert!(session.workspace().is_some());
    }

    #[test]
    fn teardown_detaches_everything() {
        let mut session = session();
        session.editor().add_rectangle().expect("add");
        let mut canvas = session.teardown();

        assert_eq!(canvas.listener_count(), 0);
        canvas.discard_active_object();
        assert!(canvas.active_objects().is_empty());
    }
}
