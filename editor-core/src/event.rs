//! Selection lifecycle events emitted by a canvas engine.

use serde::{Deserialize, Serialize};

use crate::ObjectId;

/// Name of a selection lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionEventKind {
    /// A selection appeared where there was none.
    #[serde(rename = "selection:created")]
    Created,
    /// An existing selection changed.
    #[serde(rename = "selection:updated")]
    Updated,
    /// The selection was emptied.
    #[serde(rename = "selection:cleared")]
    Cleared,
}

impl SelectionEventKind {
    /// All three kinds, in subscription order.
    pub const ALL: [Self; 3] = [Self::Created, Self::Updated, Self::Cleared];

    /// Engine event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "selection:created",
            Self::Updated => "selection:updated",
            Self::Cleared => "selection:cleared",
        }
    }
}

impl std::fmt::Display for SelectionEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selection lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SelectionEvent {
    /// Objects became selected from an empty selection.
    Created {
        /// Newly selected objects, in engine order.
        selected: Vec<ObjectId>,
    },
    /// The selection changed.
    Updated {
        /// Objects selected after the change.
        selected: Vec<ObjectId>,
        /// Objects that left the selection.
        deselected: Vec<ObjectId>,
    },
    /// The selection was emptied.
    Cleared {
        /// Objects that were selected before clearing.
        deselected: Vec<ObjectId>,
    },
}

impl SelectionEvent {
    /// Which lifecycle event this is.
    #[must_use]
    pub const fn kind(&self) -> SelectionEventKind {
        match self {
            Self::Created { .. } => SelectionEventKind::Created,
            Self::Updated { .. } => SelectionEventKind::Updated,
            Self::Cleared { .. } => SelectionEventKind::Cleared,
        }
    }

    /// Objects the event reports as selected; empty for `Cleared`.
    #[must_use]
    pub fn selected(&self) -> &[ObjectId] {
        match self {
            Self::Created { selected } | Self::Updated { selected, .. } => selected,
            Self::Cleared { .. } => &[],
        }
    }
}

/// Handle returned by a subscription, used to unsubscribe exactly that
/// listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Callback invoked for a selection event.
pub type SelectionHandler = Box<dyn FnMut(&SelectionEvent)>;
