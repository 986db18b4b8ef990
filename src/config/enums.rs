//! Configuration enum types.

use crate::draw::{Color, color::name_to_color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a session writes to disk.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// One numbered image per primitive; the canvas is cleared after each.
    #[default]
    PerShape,
    /// Everything accumulates on the canvas and a single image is written at the end.
    Screenshot,
}

/// Color specification - either a named color or RGB(A) values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
///
/// # With alpha
/// background = [0, 0, 0, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black, transparent
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
    /// RGBA color as [red, green, blue, alpha] where each component is 0-255
    Rgba([u8; 4]),
}

impl ColorSpec {
    /// Resolves the specification, returning `None` for unknown names.
    pub fn resolve(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => name_to_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::rgb(*r, *g, *b)),
            ColorSpec::Rgba([r, g, b, a]) => Some(Color::new(*r, *g, *b, *a)),
        }
    }

    /// Converts to a [`Color`], logging a warning and using `fallback` for unknown names.
    pub fn to_color(&self, fallback: Color) -> Color {
        self.resolve().unwrap_or_else(|| {
            warn!("Unknown color '{}', using {:?}", self, fallback);
            fallback
        })
    }
}

impl std::fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSpec::Name(name) => write!(f, "{name}"),
            ColorSpec::Rgb([r, g, b]) => write!(f, "[{r}, {g}, {b}]"),
            ColorSpec::Rgba([r, g, b, a]) => write!(f, "[{r}, {g}, {b}, {a}]"),
        }
    }
}
