//! Shape creation and styling commands.
//!
//! An [`Editor`] borrows the canvas and the current [`StyleDefaults`] for
//! the length of one command. New shapes take the current defaults and land
//! centered on the workspace; style changes update the defaults and the
//! active selection together.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{BoxOptions, ShapeConfig, StyleDefaults};
use crate::{CanvasEngine, CanvasObject, EditorError, EditorResult, ObjectId, ObjectKind, Point};

/// The primitive shapes the toolbar can add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Circle.
    Circle,
    /// Rectangle with rounded corners.
    SoftRectangle,
    /// Rectangle.
    Rectangle,
    /// Triangle pointing up.
    Triangle,
    /// Triangle pointing down.
    InverseTriangle,
    /// Diamond.
    Diamond,
}

impl ShapeKind {
    /// Every shape, in toolbar order.
    pub const ALL: [Self; 6] = [
        Self::Circle,
        Self::SoftRectangle,
        Self::Rectangle,
        Self::Triangle,
        Self::InverseTriangle,
        Self::Diamond,
    ];

    /// Toolbar name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::SoftRectangle => "soft_rectangle",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::InverseTriangle => "inverse_triangle",
            Self::Diamond => "diamond",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| EditorError::UnknownShape(s.to_string()))
    }
}

/// Command facade over one canvas.
pub struct Editor<'a, E: CanvasEngine + ?Sized> {
    canvas: &'a mut E,
    style: &'a mut StyleDefaults,
    shapes: &'a ShapeConfig,
    workspace_name: &'a str,
}

impl<'a, E: CanvasEngine + ?Sized> Editor<'a, E> {
    /// Borrow a canvas and its style state for a command.
    pub fn new(
        canvas: &'a mut E,
        style: &'a mut StyleDefaults,
        shapes: &'a ShapeConfig,
        workspace_name: &'a str,
    ) -> Self {
        Self {
            canvas,
            style,
            shapes,
            workspace_name,
        }
    }

    /// The canvas being edited.
    #[must_use]
    pub fn canvas(&self) -> &E {
        &*self.canvas
    }

    /// Current fill color default.
    #[must_use]
    pub fn fill_color(&self) -> &str {
        &self.style.fill_color
    }

    /// Current stroke color default.
    #[must_use]
    pub fn stroke_color(&self) -> &str {
        &self.style.stroke_color
    }

    /// Current stroke width default.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.style.stroke_width
    }

    /// Center of the workspace rectangle, if there is one.
    #[must_use]
    pub fn workspace_center(&self) -> Option<Point> {
        self.canvas
            .find_by_name(self.workspace_name)
            .map(CanvasObject::center_point)
    }

    /// Move `object` so its center matches the workspace center.
    ///
    /// Does nothing when there is no workspace.
    pub fn center(&self, object: &mut CanvasObject) {
        if let Some(center) = self.workspace_center() {
            self.canvas.center_object(object, center);
        }
    }

    /// Set the fill of every selected object and make it the default.
    pub fn change_fill_color(&mut self, value: &str) {
        self.style.fill_color = value.to_string();
        let touched = self.for_each_active(|object| {
            object.fill = value.to_string();
            true
        });
        tracing::debug!("Fill {value} applied to {touched} objects");
        self.canvas.request_render();
    }

    /// Set the stroke of selected text objects and make it the default.
    ///
    /// Shapes keep their stroke; see [`ObjectKind::supports_stroke_color`].
    pub fn change_stroke_color(&mut self, value: &str) {
        self.style.stroke_color = value.to_string();
        let touched = self.for_each_active(|object| {
            if !object.kind.supports_stroke_color() {
                return false;
            }
            object.stroke = Some(value.to_string());
            true
        });
        tracing::debug!("Stroke {value} applied to {touched} objects");
        self.canvas.request_render();
    }

    /// Set the stroke width of every selected object and make it the
    /// default.
    pub fn change_stroke_width(&mut self, value: f64) {
        self.style.stroke_width = value;
        let touched = self.for_each_active(|object| {
            object.stroke_width = value;
            true
        });
        tracing::debug!("Stroke width {value} applied to {touched} objects");
        self.canvas.request_render();
    }

    /// Add one of the toolbar shapes.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the new object as selection.
    pub fn add_shape(&mut self, kind: ShapeKind) -> EditorResult<ObjectId> {
        match kind {
            ShapeKind::Circle => self.add_circle(),
            ShapeKind::SoftRectangle => self.add_soft_rectangle(),
            ShapeKind::Rectangle => self.add_rectangle(),
            ShapeKind::Triangle => self.add_triangle(),
            ShapeKind::InverseTriangle => self.add_inverse_triangle(),
            ShapeKind::Diamond => self.add_diamond(),
        }
    }

    /// Add a circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the new object as selection.
    pub fn add_circle(&mut self) -> EditorResult<ObjectId> {
        let options = self.shapes.circle;
        let diameter = options.radius * 2.0;
        let object = CanvasObject::new(
            ObjectKind::Circle {
                radius: options.radius,
            },
            diameter,
            diameter,
        )
        .with_position(options.left, options.top);
        self.add_to_canvas(object)
    }

    /// Add a rectangle with rounded corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the new object as selection.
    pub fn add_soft_rectangle(&mut self) -> EditorResult<ObjectId> {
        let radius = self.shapes.soft_corner_radius;
        let object = boxed(
            ObjectKind::Rect {
                rx: radius,
                ry: radius,
            },
            self.shapes.rectangle,
        );
        self.add_to_canvas(object)
    }

    /// Add a rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the new object as selection.
    pub fn add_rectangle(&mut self) -> EditorResult<ObjectId> {
        let object = boxed(ObjectKind::Rect { rx: 0.0, ry: 0.0 }, self.shapes.rectangle);
        self.add_to_canvas(object)
    }

    /// Add a triangle pointing up.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the new object as selection.
    pub fn add_triangle(&mut self) -> EditorResult<ObjectId> {
        let object = boxed(ObjectKind::Triangle, self.shapes.triangle);
        self.add_to_canvas(object)
    }

    /// Add a triangle pointing down.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the new object as selection.
    pub fn add_inverse_triangle(&mut self) -> EditorResult<ObjectId> {
        let options = self.shapes.triangle;
        let (w, h) = (options.width, options.height);
        let object = polygon(
            vec![Point::new(0.0, 0.0), Point::new(w, 0.0), Point::new(w / 2.0, h)],
            options,
        );
        self.add_to_canvas(object)
    }

    /// Add a diamond through the edge midpoints of its box.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the new object as selection.
    pub fn add_diamond(&mut self) -> EditorResult<ObjectId> {
        let options = self.shapes.diamond;
        let (w, h) = (options.width, options.height);
        let object = polygon(
            vec![
                Point::new(w / 2.0, 0.0),
                Point::new(w, h / 2.0),
                Point::new(w / 2.0, h),
                Point::new(0.0, h / 2.0),
            ],
            options,
        );
        self.add_to_canvas(object)
    }

    /// Style, center, add and select a freshly built shape.
    fn add_to_canvas(&mut self, object: CanvasObject) -> EditorResult<ObjectId> {
        let mut object = object.with_style(
            self.style.fill_color.clone(),
            self.style.stroke_color.clone(),
            self.style.stroke_width,
        );
        self.center(&mut object);
        let id = self.canvas.add(object);
        self.canvas.set_active_object(id)?;
        tracing::debug!("Added object {id}");
        Ok(id)
    }

    /// Run `apply` on each selected object; returns how many it changed.
    fn for_each_active<F>(&mut self, mut apply: F) -> usize
    where
        F: FnMut(&mut CanvasObject) -> bool,
    {
        let mut touched = 0;
        for id in self.canvas.active_objects() {
            if let Some(object) = self.canvas.object_mut(id) {
                if apply(object) {
                    touched += 1;
                }
            }
        }
        touched
    }
}

fn boxed(kind: ObjectKind, options: BoxOptions) -> CanvasObject {
    CanvasObject::new(kind, options.width, options.height)
        .with_position(options.left, options.top)
        .with_angle(options.angle)
}

fn polygon(points: Vec<Point>, options: BoxOptions) -> CanvasObject {
    CanvasObject::polygon(points)
        .with_position(options.left, options.top)
        .with_angle(options.angle)
}
