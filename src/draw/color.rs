//! RGBA color type and predefined color constants.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with 8-bit components.
///
/// All components are in the range 0 (minimum) to 255 (maximum), matching the
/// byte layout of the captured bitmaps.
///
/// # Examples
///
/// ```
/// use sketchcap::draw::Color;
/// let red = Color::new(255, 0, 0, 255);
/// let translucent_blue = Color { r: 0, g: 0, b: 255, a: 128 };
/// assert!(translucent_blue.a < red.a);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Components scaled to Cairo's `0.0..=1.0` range.
    pub fn to_unit(self) -> (f64, f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        )
    }

    /// Installs this color as the source of a Cairo context.
    pub fn apply(self, ctx: &cairo::Context) {
        let (r, g, b, a) = self.to_unit();
        ctx.set_source_rgba(r, g, b, a);
    }
}

impl Default for Color {
    fn default() -> Self {
        BLACK
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const YELLOW: Color = Color::rgb(255, 255, 0);
pub const ORANGE: Color = Color::rgb(255, 128, 0);
pub const PINK: Color = Color::rgb(255, 0, 255);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

/// Maps color name strings to Color values (case-insensitive).
///
/// Used by the configuration and scene parsers.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}
