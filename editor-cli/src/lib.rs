//! # Design Editor CLI
//!
//! Headless host for `editor-core`: builds a session over the in-memory
//! scene, replays shape and style commands, and prints the scene as JSON.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p editor-cli -- --shape circle --shape diamond --fill '#f44336'
//! ```
//!
//! ## With a config file and a container resize:
//!
//! ```bash
//! cargo run -p editor-cli -- --config editor.json --resize 1920x1080 --pretty
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::PathBuf;

use clap::Parser;
use editor_core::{EditorConfig, EditorError, EditorSession, Scene, ShapeKind, Size};

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The editor rejected a command or configuration.
    #[error("editor error: {0}")]
    Editor(#[from] EditorError),

    /// The scene could not be written out.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Command-line arguments for editor-cli.
#[derive(Debug, Clone, Parser)]
#[command(name = "editor-cli")]
#[command(about = "Drive the design editor core from the command line")]
#[command(version)]
pub struct CliArgs {
    /// JSON configuration file
    #[arg(long, env = "EDITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Container width in pixels
    #[arg(long, default_value = "1280")]
    pub width: f64,

    /// Container height in pixels
    #[arg(long, default_value = "720")]
    pub height: f64,

    /// Shape to add (circle, soft_rectangle, rectangle, triangle,
    /// inverse_triangle, diamond); repeatable
    #[arg(long = "shape", value_name = "SHAPE", value_parser = parse_shape)]
    pub shapes: Vec<ShapeKind>,

    /// Fill color applied before shapes are added
    #[arg(long)]
    pub fill: Option<String>,

    /// Stroke color applied before shapes are added
    #[arg(long)]
    pub stroke: Option<String>,

    /// Stroke width applied before shapes are added
    #[arg(long)]
    pub stroke_width: Option<f64>,

    /// Container resize replayed after the shapes, as WIDTHxHEIGHT; repeatable
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub resize: Vec<Size>,

    /// Pretty-print the scene JSON
    #[arg(long)]
    pub pretty: bool,
}

/// A fully resolved run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Initial container size.
    pub container: Size,
    /// Editor configuration (file, then environment overrides).
    pub editor: EditorConfig,
    /// Shapes to add, in order.
    pub shapes: Vec<ShapeKind>,
    /// Fill color to apply.
    pub fill: Option<String>,
    /// Stroke color to apply.
    pub stroke: Option<String>,
    /// Stroke width to apply.
    pub stroke_width: Option<f64>,
    /// Container sizes to replay after editing.
    pub resizes: Vec<Size>,
    /// Pretty-print output.
    pub pretty: bool,
}

impl RunConfig {
    /// Resolve arguments, loading the config file if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_args(args: CliArgs) -> Result<Self, CliError> {
        let editor = match &args.config {
            Some(path) => EditorConfig::from_path(path)?,
            None => EditorConfig::default(),
        }
        .with_env_overrides();

        Ok(Self {
            container: Size::new(args.width, args.height),
            editor,
            shapes: args.shapes,
            fill: args.fill,
            stroke: args.stroke,
            stroke_width: args.stroke_width,
            resizes: args.resize,
            pretty: args.pretty,
        })
    }
}

/// Run the commands in `config` and return the resulting scene JSON.
///
/// # Errors
///
/// Returns an error if the session cannot start, a shape cannot be added,
/// or the scene fails to serialize.
pub fn run(config: &RunConfig) -> Result<String, CliError> {
    let mut session =
        EditorSession::init(Scene::default(), config.container, config.editor.clone())?;

    {
        let mut editor = session.editor();
        if let Some(fill) = &config.fill {
            editor.change_fill_color(fill);
        }
        if let Some(stroke) = &config.stroke {
            editor.change_stroke_color(stroke);
        }
        if let Some(width) = config.stroke_width {
            editor.change_stroke_width(width);
        }
        for &kind in &config.shapes {
            let id = editor.add_shape(kind)?;
            tracing::info!("Added {kind} {id}");
        }
    }

    for &size in &config.resizes {
        if let Some(outcome) = session.resize(size) {
            tracing::info!("Resized to {}x{}: {outcome:?}", size.width, size.height);
        }
    }

    tracing::debug!("{} object(s) selected", session.selected_objects().len());

    let scene = session.teardown();
    let json = if config.pretty {
        serde_json::to_string_pretty(&scene)?
    } else {
        scene.to_json()?
    };
    Ok(json)
}

fn parse_shape(value: &str) -> Result<ShapeKind, String> {
    value.parse().map_err(|e: EditorError| e.to_string())
}

fn parse_size(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let width: f64 = width.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let height: f64 = height.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok(Size::new(width, height))
}
