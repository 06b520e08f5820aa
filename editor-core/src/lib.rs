//! # Design Editor Core
//!
//! Coordination layer between a design tool's UI and its 2D canvas engine.
//! Compiles to WASM for the browser host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               EditorSession                 │
//! ├─────────────────────────────────────────────┤
//! │  Viewport       │  Selection    │  Editor   │
//! │  - fit/center   │  - created    │  - shapes │
//! │  - AutoResize   │  - updated    │  - fill   │
//! │                 │  - cleared    │  - stroke │
//! ├─────────────────────────────────────────────┤
//! │        CanvasEngine (Scene in memory)       │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod object;
pub mod scene;
pub mod selection;
pub mod session;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use color::{rgba_object_to_string, ColorPicker, PickerColor, Rgba, PALETTE};
pub use config::{EditorConfig, StyleDefaults};
pub use editor::{Editor, ShapeKind};
pub use engine::CanvasEngine;
pub use error::{EditorError, EditorResult};
pub use event::{ListenerId, SelectionEvent, SelectionEventKind, SelectionHandler};
pub use geometry::{find_scale_to_fit, Point, Size, ViewportTransform};
pub use object::{CanvasObject, ObjectId, ObjectKind, Shadow};
pub use scene::Scene;
pub use selection::{SelectionSink, SelectionTracker};
pub use session::EditorSession;
pub use viewport::{fit, AutoResize, FitOutcome, SkipReason};

/// Editor core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
