//! Editor configuration: workspace, margin, default shapes and styles.
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes. Environment variables can override the workspace and margin.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{EditorError, EditorResult, Shadow, Size};

/// Default fill color for new shapes.
pub const FILL_COLOR: &str = "rgba(0,0,0,1)";
/// Default stroke color for new shapes.
pub const STROKE_COLOR: &str = "rgba(0,0,0,1)";
/// Default stroke width for new shapes.
pub const STROKE_WIDTH: f64 = 2.0;
/// Reserved name of the workspace rectangle.
pub const WORKSPACE_NAME: &str = "clip";
/// Workspace width in the reference deployment.
pub const WORKSPACE_WIDTH: f64 = 900.0;
/// Workspace height in the reference deployment.
pub const WORKSPACE_HEIGHT: f64 = 1200.0;
/// Share of the fit scale actually used, leaving a margin.
pub const ZOOM_RATIO: f64 = 0.95;
/// Corner radius of the soft rectangle.
pub const SOFT_CORNER_RADIUS: f64 = 50.0;

const ENV_ZOOM_RATIO: &str = "EDITOR_ZOOM_RATIO";
const ENV_WORKSPACE_WIDTH: &str = "EDITOR_WORKSPACE_WIDTH";
const ENV_WORKSPACE_HEIGHT: &str = "EDITOR_WORKSPACE_HEIGHT";

/// Current style applied to newly created shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    /// Fill color.
    pub fill_color: String,
    /// Stroke color.
    pub stroke_color: String,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            fill_color: FILL_COLOR.to_string(),
            stroke_color: STROKE_COLOR.to_string(),
            stroke_width: STROKE_WIDTH,
        }
    }
}

/// Position and radius of a new circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleOptions {
    /// Initial left.
    pub left: f64,
    /// Initial top.
    pub top: f64,
    /// Radius.
    pub radius: f64,
}

/// Position and box of a new rectangle, triangle or diamond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxOptions {
    /// Initial left.
    pub left: f64,
    /// Initial top.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub angle: f64,
}

impl BoxOptions {
    const fn square(side: f64) -> Self {
        Self {
            left: 100.0,
            top: 100.0,
            width: side,
            height: side,
            angle: 0.0,
        }
    }
}

/// Default geometry of each shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Circle defaults.
    pub circle: CircleOptions,
    /// Rectangle and soft rectangle defaults.
    pub rectangle: BoxOptions,
    /// Triangle and inverted triangle defaults.
    pub triangle: BoxOptions,
    /// Diamond defaults.
    pub diamond: BoxOptions,
    /// Corner radius of the soft rectangle.
    pub soft_corner_radius: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            circle: CircleOptions {
                left: 100.0,
                top: 100.0,
                radius: 225.0,
            },
            rectangle: BoxOptions::square(400.0),
            triangle: BoxOptions::square(400.0),
            diamond: BoxOptions::square(600.0),
            soft_corner_radius: SOFT_CORNER_RADIUS,
        }
    }
}

/// The fixed-size page rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Reserved name used to find the workspace.
    pub name: String,
    /// Width in workspace units.
    pub width: f64,
    /// Height in workspace units.
    pub height: f64,
    /// Page color.
    pub fill: String,
    /// Shadow drawn under the page.
    pub shadow: Shadow,
}

impl WorkspaceConfig {
    /// Width and height as a [`Size`].
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            name: WORKSPACE_NAME.to_string(),
            width: WORKSPACE_WIDTH,
            height: WORKSPACE_HEIGHT,
            fill: "white".to_string(),
            shadow: Shadow {
                color: "rgba(0,0,0,0.8)".to_string(),
                blur: 5.0,
            },
        }
    }
}

/// Complete editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Workspace rectangle.
    pub workspace: WorkspaceConfig,
    /// Margin ratio applied to the fit scale.
    pub zoom_ratio: f64,
    /// Initial style defaults.
    pub style: StyleDefaults,
    /// Default shape geometry.
    pub shapes: ShapeConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            zoom_ratio: ZOOM_RATIO,
            style: StyleDefaults::default(),
            shapes: ShapeConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Serialization`] for malformed JSON and
    /// [`EditorError::InvalidConfig`] for out-of-range values.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the file cannot be read, otherwise
    /// the errors of [`EditorConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading editor config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply overrides from the process environment.
    ///
    /// Environment variables:
    /// - `EDITOR_ZOOM_RATIO`: margin ratio (default: 0.95)
    /// - `EDITOR_WORKSPACE_WIDTH`: workspace width (default: 900)
    /// - `EDITOR_WORKSPACE_HEIGHT`: workspace height (default: 1200)
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; unparsable values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());
        if let Some(ratio) = number(ENV_ZOOM_RATIO) {
            self.zoom_ratio = ratio;
        }
        if let Some(width) = number(ENV_WORKSPACE_WIDTH) {
            self.workspace.width = width;
        }
        if let Some(height) = number(ENV_WORKSPACE_HEIGHT) {
            self.workspace.height = height;
        }
        self
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> EditorResult<()> {
        if !(self.zoom_ratio.is_finite() && self.zoom_ratio > 0.0 && self.zoom_ratio <= 1.0) {
            return Err(invalid(format!(
                "zoom_ratio must be in (0, 1], got {}",
                self.zoom_ratio
            )));
        }
        if self.workspace.name.is_empty() {
            return Err(invalid("workspace name must not be empty".to_string()));
        }
        if !self.workspace.size().has_area() {
            return Err(invalid(format!(
                "workspace must have area, got {}x{}",
                self.workspace.width, self.workspace.height
            )));
        }
        if !(self.style.stroke_width.is_finite() && self.style.stroke_width >= 0.0) {
            return Err(invalid(format!(
                "stroke_width must be non-negative, got {}",
                self.style.stroke_width
            )));
        }
        let shapes = &self.shapes;
        if !(shapes.circle.radius.is_finite() && shapes.circle.radius > 0.0) {
            return Err(invalid(format!(
                "circle radius must be positive, got {}",
                shapes.circle.radius
            )));
        }
        for (label, options) in [
            ("rectangle", shapes.rectangle),
            ("triangle", shapes.triangle),
            ("diamond", shapes.diamond),
        ] {
            if !Size::new(options.width, options.height).has_area() {
                return Err(invalid(format!(
                    "{label} must have area, got {}x{}",
                    options.width, options.height
                )));
            }
        }
        if !(shapes.soft_corner_radius.is_finite() && shapes.soft_corner_radius >= 0.0) {
            return Err(invalid(format!(
                "soft_corner_radius must be non-negative, got {}",
                shapes.soft_corner_radius
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> EditorError {
    EditorError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = EditorConfig::default();
        assert_eq!(config.workspace.name, "clip");
        assert_eq!(config.workspace.size(), Size::new(900.0, 1200.0));
        assert!((config.zoom_ratio - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.style.fill_color, "rgba(0,0,0,1)");
        assert!((config.style.stroke_width - 2.0).abs() < f64::EPSILON);
        assert!((config.shapes.circle.radius - 225.0).abs() < f64::EPSILON);
        assert!((config.shapes.diamond.width - 600.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            EditorConfig::from_json(r#"{"workspace":{"width":1080},"style":{"fill_color":"red"}}"#)
                .expect("valid config");
        assert!((config.workspace.width - 1080.0).abs() < f64::EPSILON);
        assert!((config.workspace.height - 1200.0).abs() < f64::EPSILON);
        assert_eq!(config.style.fill_color, "red");
        assert_eq!(config.style.stroke_color, STROKE_COLOR);
        assert_eq!(config.shapes, ShapeConfig::default());
    }

    #[test]
    fn rejects_zoom_ratio_out_of_range() {
        for json in [r#"{"zoom_ratio":0}"#, r#"{"zoom_ratio":1.5}"#, r#"{"zoom_ratio":-0.2}"#] {
            let result = EditorConfig::from_json(json);
            assert!(
                matches!(result, Err(EditorError::InvalidConfig(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_degenerate_workspace() {
        let result = EditorConfig::from_json(r#"{"workspace":{"height":0}}"#);
        assert!(matches!(result, Err(EditorError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = EditorConfig::from_json("{ not json");
        assert!(matches!(result, Err(EditorError::Serialization(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"zoom_ratio":0.8}}"#).expect("write");

        let config = EditorConfig::from_path(file.path()).expect("load");
        assert!((config.zoom_ratio - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = EditorConfig::from_path(dir.path().join("absent.json"));
        assert!(matches!(result, Err(EditorError::Io(_))));
    }

    #[test]
    fn overrides_replace_parsable_values_only() {
        let config = EditorConfig::default().with_overrides(|key| match key {
            "EDITOR_ZOOM_RATIO" => Some("0.9".to_string()),
            "EDITOR_WORKSPACE_WIDTH" => Some("wide".to_string()),
            "EDITOR_WORKSPACE_HEIGHT" => Some(" 800 ".to_string()),
            _ => None,
        });
        assert!((config.zoom_ratio - 0.9).abs() < f64::EPSILON);
        assert!((config.workspace.width - 900.0).abs() < f64::EPSILON);
        assert!((config.workspace.height - 800.0).abs() < f64::EPSILON);
    }
}
