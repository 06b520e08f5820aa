//! Mirrors the canvas selection into observable state.

use std::rc::Rc;

use crate::{
    CanvasEngine, EditorError, EditorResult, ListenerId, ObjectId, SelectionEvent,
    SelectionEventKind,
};

/// Receives the current selection after every selection event.
pub type SelectionSink = Rc<dyn Fn(Vec<ObjectId>)>;

/// Subscribes to a canvas's selection events and republishes the selection.
///
/// Listener handles are kept so detaching removes exactly what this tracker
/// added. Always detach from the old canvas before attaching to a new one.
pub struct SelectionTracker {
    sink: SelectionSink,
    listeners: Vec<ListenerId>,
}

impl std::fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl SelectionTracker {
    /// Create a detached tracker publishing into `sink`.
    #[must_use]
    pub fn new(sink: SelectionSink) -> Self {
        Self {
            sink,
            listeners: Vec::new(),
        }
    }

    /// Whether the tracker holds subscriptions.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Subscribe to created, updated and cleared events on `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::TrackerAlreadyAttached`] if still subscribed
    /// to a canvas.
    pub fn attach<E>(&mut self, canvas: &mut E) -> EditorResult<()>
    where
        E: CanvasEngine + ?Sized,
    {
        if self.is_attached() {
            return Err(EditorError::TrackerAlreadyAttached);
        }
        for kind in SelectionEventKind::ALL {
            let sink = Rc::clone(&self.sink);
            let id = canvas.on(
                kind,
                Box::new(move |event: &SelectionEvent| {
                    let selected = event.selected().to_vec();
                    tracing::debug!("{kind}: {} selected", selected.len());
                    sink(selected);
                }),
            );
            self.listeners.push(id);
        }
        Ok(())
    }

    /// Remove this tracker's listeners from `canvas`.
    pub fn detach<E>(&mut self, canvas: &mut E)
    where
        E: CanvasEngine + ?Sized,
    {
        for id in self.listeners.drain(..) {
            if !canvas.off(id) {
                tracing::warn!("Listener {id:?} was not registered on this canvas");
            }
        }
    }

    /// Move the subscriptions from `old` to `new`.
    ///
    /// # Errors
    ///
    /// Never fails after detaching; kept fallible to match [`Self::attach`].
    pub fn reattach<A, B>(&mut self, old: &mut A, new: &mut B) -> EditorResult<()>
    where
        A: CanvasEngine + ?Sized,
        B: CanvasEngine + ?Sized,
    {
        self.detach(old);
        self.attach(new)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{CanvasObject, ObjectKind, Scene};

    fn recorder() -> (SelectionSink, Rc<RefCell<Vec<Vec<ObjectId>>>>) {
        let published = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&published);
        let sink: SelectionSink = Rc::new(move |ids: Vec<ObjectId>| log.borrow_mut().push(ids));
        (sink, published)
    }

    fn scene_with(count: usize) -> (Scene, Vec<ObjectId>) {
        let mut scene = Scene::new(800.0, 600.0);
        let ids = (0..count)
            .map(|_| scene.add(CanvasObject::new(ObjectKind::Triangle, 10.0, 10.0)))
            .collect();
        (scene, ids)
    }

    #[test]
    fn publishes_selection_in_reported_order() {
        let (mut scene, ids) = scene_with(2);
        let (sink, published) = recorder();
        let mut tracker = SelectionTracker::new(sink);
        tracker.attach(&mut scene).expect("attach");

        scene.select(&[ids[1], ids[0]]).expect("select");
        assert_eq!(published.borrow().last(), Some(&vec![ids[1], ids[0]]));
    }

    #[test]
    fn publishes_empty_list_on_clear() {
        let (mut scene, ids) = scene_with(1);
        let (sink, published) = recorder();
        let mut tracker = SelectionTracker::new(sink);
        tracker.attach(&mut scene).expect("attach");

        scene.select(&ids).expect("select");
        scene.discard_active_object();
        assert_eq!(published.borrow().last(), Some(&Vec::new()));
        assert_eq!(published.borrow().len(), 2);
    }

    #[test]
    fn created_event_without_objects_publishes_empty_list() {
        let (mut scene, _) = scene_with(0);
        let (sink, published) = recorder();
        let mut tracker = SelectionTracker::new(sink);
        tracker.attach(&mut scene).expect("attach");

        scene.emit(&SelectionEvent::Created {
            selected: Vec::new(),
        });
        assert_eq!(*published.borrow(), vec![Vec::<ObjectId>::new()]);
    }

    #[test]
    fn attaching_twice_is_rejected() {
        let (mut scene, _) = scene_with(0);
        let (sink, _) = recorder();
        let mut tracker = SelectionTracker::new(sink);
        tracker.attach(&mut scene).expect("attach");

        assert!(matches!(
            tracker.attach(&mut scene),
            Err(EditorError::TrackerAlreadyAttached)
        ));
        assert_eq!(scene.listener_count(), 3);
    }

    #[test]
    fn reattach_silences_old_canvas() {
        let (mut old, old_ids) = scene_with(1);
        let (mut new, new_ids) = scene_with(1);
        let (sink, published) = recorder();
        let mut tracker = SelectionTracker::new(sink);
        tracker.attach(&mut old).expect("attach");

        tracker.reattach(&mut old, &mut new).expect("reattach");
        assert_eq!(old.listener_count(), 0);
        assert_eq!(new.listener_count(), 3);

        old.select(&old_ids).expect("select");
        assert!(published.borrow().is_empty());

        new.select(&new_ids).expect("select");
        assert_eq!(*published.borrow(), vec![new_ids.clone()]);
    }

    #[test]
    fn detach_leaves_foreign_listeners() {
        let (mut scene, _) = scene_with(0);
        let other = scene.on(SelectionEventKind::Cleared, Box::new(|_: &SelectionEvent| {}));
        let (sink, _) = recorder();
        let mut tracker = SelectionTracker::new(sink);
        tracker.attach(&mut scene).expect("attach");

        tracker.detach(&mut scene);
        assert!(!tracker.is_attached());
        assert_eq!(scene.listener_count(), 1);
        assert!(scene.off(other));
    }
}
