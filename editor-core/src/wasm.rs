//! WebAssembly bindings for editor-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.

use wasm_bindgen::prelude::*;

use crate::{
    rgba_object_to_string, EditorConfig, EditorSession, PickerColor, Scene, ShapeKind, Size,
};

/// Initialize the editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Format a picker payload (`{r,g,b,a}` JSON, or `null` for transparent)
/// as a CSS color.
///
/// # Errors
///
/// Returns an error string if the payload is not valid JSON.
#[wasm_bindgen(js_name = rgbaObjectToString)]
pub fn rgba_object_to_string_js(json: &str) -> Result<String, String> {
    let color: PickerColor = serde_json::from_str(json).map_err(|e| e.to_string())?;
    Ok(rgba_object_to_string(color))
}

/// Editor session for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    session: EditorSession<Scene>,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor inside a container of the given size, using the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error string if the session cannot be initialized.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<WasmEditor, String> {
        Self::with_config(width, height, "{}")
    }

    /// Create an editor from a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error string if the configuration is invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(width: f64, height: f64, config_json: &str) -> Result<WasmEditor, String> {
        let config = EditorConfig::from_json(config_json).map_err(|e| e.to_string())?;
        let session = EditorSession::init(Scene::default(), Size::new(width, height), config)
            .map_err(|e| e.to_string())?;
        Ok(Self { session })
    }

    /// Forward a container resize. Returns the fit outcome as JSON.
    #[must_use]
    pub fn resize(&mut self, width: f64, height: f64) -> String {
        let outcome = self.session.resize(Size::new(width, height));
        serde_json::to_string(&outcome).unwrap_or_default()
    }

    /// Add a shape by toolbar name. Returns the new object's ID.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown shape name.
    #[wasm_bindgen(js_name = addShape)]
    pub fn add_shape(&mut self, name: &str) -> Result<String, String> {
        let kind: ShapeKind = name.parse().map_err(|e: crate::EditorError| e.to_string())?;
        let id = self
            .session
            .editor()
            .add_shape(kind)
            .map_err(|e| e.to_string())?;
        Ok(id.to_string())
    }

    /// Change the fill of the selection and the default fill.
    #[wasm_bindgen(js_name = changeFillColor)]
    pub fn change_fill_color(&mut self, value: &str) {
        self.session.editor().change_fill_color(value);
    }

    /// Change the stroke of selected text and the default stroke.
    #[wasm_bindgen(js_name = changeStrokeColor)]
    pub fn change_stroke_color(&mut self, value: &str) {
        self.session.editor().change_stroke_color(value);
    }

    /// Change the stroke width of the selection and the default width.
    #[wasm_bindgen(js_name = changeStrokeWidth)]
    pub fn change_stroke_width(&mut self, value: f64) {
        self.session.editor().change_stroke_width(value);
    }

    /// Current selection as an array of ID strings.
    #[wasm_bindgen(js_name = selectedObjects)]
    #[must_use]
    pub fn selected_objects(&self) -> js_sys::Array {
        self.session
            .selected_objects()
            .iter()
            .map(|id| JsValue::from_str(&id.to_string()))
            .collect()
    }

    /// Get the current scene as JSON.
    #[wasm_bindgen(js_name = getSceneJson)]
    #[must_use]
    pub fn get_scene_json(&self) -> String {
        self.session.canvas().to_json().unwrap_or_default()
    }

    /// Current style defaults as JSON.
    #[wasm_bindgen(js_name = getStyleJson)]
    #[must_use]
    pub fn get_style_json(&self) -> String {
        serde_json::to_string(self.session.style()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_editor_new_creates_workspace() {
        let editor = WasmEditor::new(1280.0, 720.0).expect("editor");
        let json = editor.get_scene_json();
        assert!(json.contains("\"clip\""));
    }

    #[test]
    fn with_config_rejects_invalid_json() {
        assert!(WasmEditor::with_config(800.0, 600.0, "{ not valid json }").is_err());
    }

    #[test]
    fn add_shape_rejects_unknown_name() {
        let mut editor = WasmEditor::new(800.0, 600.0).expect("editor");
        assert!(editor.add_shape("hexagon").is_err());
    }

    #[test]
    fn fill_change_updates_style_json() {
        let mut editor = WasmEditor::new(800.0, 600.0).expect("editor");
        editor.add_shape("circle").expect("circle");
        editor.change_fill_color("#ff0000");
        assert!(editor.get_style_json().contains("#ff0000"));
        assert!(editor.get_scene_json().contains("#ff0000"));
    }

    #[test]
    fn resize_reports_fit_outcome() {
        let mut editor = WasmEditor::new(800.0, 600.0).expect("editor");
        assert!(editor.resize(1024.0, 768.0).contains("fitted"));
        assert!(editor.resize(0.0, 768.0).contains("skipped"));
    }

    #[test]
    fn rgba_payload_formats() {
        assert_eq!(
            rgba_object_to_string_js(r#"{"r":1,"g":2,"b":3}"#).expect("payload"),
            "rgba(1,2,3,1)"
        );
        assert!(rgba_object_to_string_js("nope").is_err());
    }
}
