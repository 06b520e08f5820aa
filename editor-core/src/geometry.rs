//! Points, sizes and the viewport transform.

use serde::{Deserialize, Serialize};

/// A point in either container (screen) or workspace (world) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and strictly positive.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The center of a box of this size anchored at the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Largest uniform scale at which `source` fits entirely inside `dest`.
///
/// Returns `None` when either size has no area, so callers never feed a
/// NaN or infinite factor into a transform.
#[must_use]
pub fn find_scale_to_fit(source: Size, dest: Size) -> Option<f64> {
    if !source.has_area() || !dest.has_area() {
        return None;
    }
    Some((dest.width / source.width).min(dest.height / source.height))
}

/// A 2D affine transform `[a, b, c, d, e, f]`.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`. `a` and `d` carry
/// the scale, `e` and `f` the translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewportTransform(pub [f64; 6]);

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Horizontal scale component.
    #[must_use]
    pub const fn scale_x(&self) -> f64 {
        self.0[0]
    }

    /// Vertical scale component.
    #[must_use]
    pub const fn scale_y(&self) -> f64 {
        self.0[3]
    }

    /// Horizontal translation.
    #[must_use]
    pub const fn translate_x(&self) -> f64 {
        self.0[4]
    }

    /// Vertical translation.
    #[must_use]
    pub const fn translate_y(&self) -> f64 {
        self.0[5]
    }

    /// Replace the translation components.
    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.0[4] = x;
        self.0[5] = y;
    }

    /// Apply the transform to a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// The inverse transform, or `None` if the matrix is singular.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let [a, b, c, d, e, f] = self.0;
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self([
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * f - d * e) / det,
            (b * e - a * f) / det,
        ]))
    }

    /// Set the scale to `zoom` while keeping `point` (in container space)
    /// fixed on screen.
    ///
    /// A singular transform is left untouched.
    pub fn zoom_to_point(&mut self, point: Point, zoom: f64) {
        let Some(inverse) = self.invert() else {
            return;
        };
        let world = inverse.apply(point);
        self.0[0] = zoom;
        self.0[3] = zoom;
        let after = self.apply(world);
        self.0[4] += point.x - after.x;
        self.0[5] += point.y - after.y;
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}
