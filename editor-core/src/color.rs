//! Color values exchanged with the color picker.

use serde::{Deserialize, Serialize};

use crate::{EditorError, EditorResult};

/// Swatches offered below the full picker.
pub const PALETTE: [&str; 19] = [
    "#f44336",
    "#e91e63",
    "#9c27b0",
    "#673ab7",
    "#3f51b5",
    "#2196f3",
    "#03a9f4",
    "#00bcd4",
    "#009688",
    "#4caf50",
    "#8bc34a",
    "#cddc39",
    "#ffeb3b",
    "#ffc107",
    "#ff9800",
    "#ff5722",
    "#795548",
    "#607d8b",
    "transparent",
];

/// A structured color as reported by a picker widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red, 0-255.
    pub r: u8,
    /// Green, 0-255.
    pub g: u8,
    /// Blue, 0-255.
    pub b: u8,
    /// Alpha, 0-1. Absent means opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Rgba {
    /// An opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Parse `#rrggbb`, `#rrggbbaa` or `#rgb`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidColor`] for anything else.
    pub fn from_hex(hex: &str) -> EditorResult<Self> {
        let invalid = || EditorError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut rgb = [0_u8; 3];
                for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
                    let v = channel(&c.to_string())?;
                    *slot = v * 17;
                }
                Ok(Self::opaque(rgb[0], rgb[1], rgb[2]))
            }
            6 | 8 => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                let a = if digits.len() == 8 {
                    Some(f64::from(channel(&digits[6..8])?) / 255.0)
                } else {
                    None
                };
                Ok(Self { r, g, b, a })
            }
            _ => Err(invalid()),
        }
    }

    /// Alpha, defaulting to opaque.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }

    /// CSS `rgba(r,g,b,a)` form.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.alpha())
    }
}

/// What a picker can report.
///
/// In JSON, `null` is the transparent swatch and an `{r,g,b,a}` object is
/// any other color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickerColor {
    /// The transparent swatch.
    Transparent,
    /// Any other color.
    Rgba(Rgba),
}

/// Format a picker value as a CSS color string.
#[must_use]
pub fn rgba_object_to_string(color: PickerColor) -> String {
    match color {
        PickerColor::Transparent => "rgba(0,0,0,0)".to_string(),
        PickerColor::Rgba(rgba) => rgba.to_css(),
    }
}

/// Resolve a palette swatch to the value a picker reports for it.
///
/// # Errors
///
/// Returns [`EditorError::InvalidColor`] if the swatch is neither
/// `transparent` nor a hex color.
pub fn swatch_color(swatch: &str) -> EditorResult<PickerColor> {
    if swatch.eq_ignore_ascii_case("transparent") {
        Ok(PickerColor::Transparent)
    } else {
        Rgba::from_hex(swatch).map(PickerColor::Rgba)
    }
}

/// Color picker control: a full picker plus the [`PALETTE`] swatches.
///
/// Either input is normalized to an `rgba(...)` string and passed to
/// `on_change`.
pub struct ColorPicker<F>
where
    F: FnMut(String),
{
    value: String,
    on_change: F,
}

impl<F> std::fmt::Debug for ColorPicker<F>
where
    F: FnMut(String),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorPicker")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<F> ColorPicker<F>
where
    F: FnMut(String),
{
    /// Create a picker showing `value`.
    pub fn new(value: impl Into<String>, on_change: F) -> Self {
        Self {
            value: value.into(),
            on_change,
        }
    }

    /// Currently shown value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Handle a change from the full picker.
    pub fn pick(&mut self, color: PickerColor) {
        let formatted = rgba_object_to_string(color);
        self.value.clone_from(&formatted);
        (self.on_change)(formatted);
    }

    /// Handle a click on a palette swatch.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidColor`] for an unparsable swatch;
    /// `on_change` is not called.
    pub fn pick_swatch(&mut self, swatch: &str) -> EditorResult<()> {
        let color = swatch_color(swatch)?;
        self.pick(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_is_fully_clear() {
        assert_eq!(rgba_object_to_string(PickerColor::Transparent), "rgba(0,0,0,0)");
    }

    #[test]
    fn missing_alpha_is_opaque() {
        let color = PickerColor::Rgba(Rgba::opaque(12, 34, 56));
        assert_eq!(rgba_object_to_string(color), "rgba(12,34,56,1)");
    }

    #[test]
    fn explicit_alpha_is_kept() {
        let color = PickerColor::Rgba(Rgba {
            r: 255,
            g: 0,
            b: 0,
            a: Some(0.5),
        });
        assert_eq!(rgba_object_to_string(color), "rgba(255,0,0,0.5)");
    }

    #[test]
    fn hex_forms_parse() {
        assert_eq!(Rgba::from_hex("#f44336").expect("hex"), Rgba::opaque(244, 67, 54));
        assert_eq!(Rgba::from_hex("#fff").expect("hex"), Rgba::opaque(255, 255, 255));
        let with_alpha = Rgba::from_hex("#00000080").expect("hex");
        assert!((with_alpha.alpha() - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn bad_hex_is_rejected() {
        for input in ["f44336", "#f4433", "#gggggg", "#ééé", ""] {
            assert!(
                matches!(Rgba::from_hex(input), Err(EditorError::InvalidColor(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn every_palette_swatch_resolves() {
        for swatch in PALETTE {
            assert!(swatch_color(swatch).is_ok(), "{swatch} should resolve");
        }
    }

    #[test]
    fn picker_payload_deserializes() {
        let color: PickerColor =
            serde_json::from_str(r#"{"r":1,"g":2,"b":3,"a":0.25}"#).expect("payload");
        assert_eq!(rgba_object_to_string(color), "rgba(1,2,3,0.25)");

        let color: PickerColor = serde_json::from_str("null").expect("payload");
        assert_eq!(color, PickerColor::Transparent);
    }

    #[test]
    fn picker_forwards_formatted_value() {
        let mut received = Vec::new();
        let mut picker = ColorPicker::new("rgba(0,0,0,1)", |value| received.push(value));

        picker.pick_swatch("#f44336").expect("swatch");
        picker.pick(PickerColor::Transparent);
        assert_eq!(picker.value(), "rgba(0,0,0,0)");
        assert!(picker.pick_swatch("nope").is_err());
        assert_eq!(picker.value(), "rgba(0,0,0,0)");
        drop(picker);

        assert_eq!(received, vec!["rgba(244,67,54,1)", "rgba(0,0,0,0)"]);
    }
}
