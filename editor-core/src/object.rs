//! Drawable objects - the contents of a canvas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Size};

/// Unique identifier for a canvas object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Create a new unique object ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of drawable an object is.
///
/// Serialized with the engine's own type names (`rect`, `i-text`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ObjectKind {
    /// Axis-aligned rectangle with optional rounded corners.
    Rect {
        /// Horizontal corner radius.
        rx: f64,
        /// Vertical corner radius.
        ry: f64,
    },

    /// Circle inscribed in the object's box.
    Circle {
        /// Radius in workspace units.
        radius: f64,
    },

    /// Isosceles triangle pointing up.
    Triangle,

    /// Closed polygon; points are relative to the object's top-left.
    Polygon {
        /// Vertex list.
        points: Vec<Point>,
    },

    /// Static text.
    Text {
        /// Text content.
        text: String,
    },

    /// Editable single-block text.
    #[serde(rename = "i-text")]
    IText {
        /// Text content.
        text: String,
    },

    /// Wrapping text box.
    Textbox {
        /// Text content.
        text: String,
    },

    /// Raster image.
    Image {
        /// Image source URI.
        src: String,
    },
}

impl ObjectKind {
    /// True for the text-like kinds.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Text { .. } | Self::IText { .. } | Self::Textbox { .. }
        )
    }

    /// Whether a stroke-color change applies to this kind.
    ///
    /// Only text outlines take the stroke color; shapes keep their stroke.
    #[must_use]
    pub const fn supports_stroke_color(&self) -> bool {
        self.is_text()
    }
}

/// Drop shadow attached to an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// CSS color.
    pub color: String,
    /// Blur radius in pixels.
    pub blur: f64,
}

/// A drawable object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// Optional reserved name (the workspace is tagged this way).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// What is drawn.
    pub kind: ObjectKind,
    /// X of the top-left corner.
    pub left: f64,
    /// Y of the top-left corner.
    pub top: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Rotation about the top-left corner, in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Fill color.
    pub fill: String,
    /// Stroke color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width.
    #[serde(default)]
    pub stroke_width: f64,
    /// Whether the user can select this object.
    pub selectable: bool,
    /// Whether resize/rotate controls are shown.
    pub has_controls: bool,
    /// Optional drop shadow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl CanvasObject {
    /// Create an object of the given kind and size at the origin.
    #[must_use]
    pub fn new(kind: ObjectKind, width: f64, height: f64) -> Self {
        Self {
            id: ObjectId::new(),
            name: None,
            kind,
            left: 0.0,
            top: 0.0,
            width,
            height,
            angle: 0.0,
            fill: "rgb(0,0,0)".to_string(),
            stroke: None,
            stroke_width: 1.0,
            selectable: true,
            has_controls: true,
            shadow: None,
        }
    }

    /// Create a polygon whose box is the bounding box of `points`.
    ///
    /// Points are shifted so the box starts at the object's top-left.
    #[must_use]
    pub fn polygon(points: Vec<Point>) -> Self {
        if points.is_empty() {
            return Self::new(ObjectKind::Polygon { points }, 0.0, 0.0);
        }
        let (min, max) = points.iter().fold(
            (
                Point::new(f64::INFINITY, f64::INFINITY),
                Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(min, max), p| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        );
        let points = points
            .into_iter()
            .map(|p| Point::new(p.x - min.x, p.y - min.y))
            .collect();
        Self::new(ObjectKind::Polygon { points }, max.x - min.x, max.y - min.y)
    }

    /// Set the name tag.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the top-left position.
    #[must_use]
    pub fn with_position(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Set fill, stroke and stroke width in one go.
    #[must_use]
    pub fn with_style(
        mut self,
        fill: impl Into<String>,
        stroke: impl Into<String>,
        stroke_width: f64,
    ) -> Self {
        self.fill = fill.into();
        self.stroke = Some(stroke.into());
        self.stroke_width = stroke_width;
        self
    }

    /// Whether the object carries `name`.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Width and height of the object's box.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Offset from the top-left corner to the center, after rotation.
    fn center_offset(&self) -> Point {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Point::new(half_w * cos - half_h * sin, half_w * sin + half_h * cos)
    }

    /// Center point in workspace coordinates.
    #[must_use]
    pub fn center_point(&self) -> Point {
        let offset = self.center_offset();
        Point::new(self.left + offset.x, self.top + offset.y)
    }

    /// Move the object so its center lands on `center`.
    pub fn set_center_point(&mut self, center: Point) {
        let offset = self.center_offset();
        self.left = center.x - offset.x;
        self.top = center.y - offset.y;
    }
}
