//! Configuration type definitions.

use super::enums::{CaptureMode, ColorSpec};
use crate::capture::OutputFormat;
use crate::draw::RotationMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas dimensions and background.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_size")]
    pub width: i32,

    /// Canvas height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_size")]
    pub height: i32,

    /// Color the canvas is cleared to between shapes
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            background: default_background(),
        }
    }
}

/// Initial cursor stroke state.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Starting stroke color - either a named color or an RGB(A) array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Starting stroke thickness in pixels (valid range: 1 - 256)
    #[serde(default = "default_thickness")]
    pub default_thickness: i32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
        }
    }
}

/// Where and how captured images are written.
///
/// # Example
/// ```toml
/// [output]
/// directory = "~/Pictures/sketchcap"
/// file_prefix = "drawing_"
/// format = "png"
/// mode = "per-shape"
/// ```
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Directory images are written to (supports `~/`)
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File name prefix for per-shape images; files are named `<prefix><n>.<ext>`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Number carried by the first per-shape image
    #[serde(default = "default_first_index")]
    pub first_index: u32,

    /// Image encoding
    #[serde(default)]
    pub format: OutputFormat,

    /// One image per primitive, or a single screenshot at the end
    #[serde(default)]
    pub mode: CaptureMode,

    /// File stem of the screenshot image
    #[serde(default = "default_screenshot_name")]
    pub screenshot_name: String,

    /// Record the cursor position of every drawn primitive
    #[serde(default = "default_write_positions")]
    pub write_positions: bool,

    /// Name of the position log inside the output directory
    #[serde(default = "default_positions_file")]
    pub positions_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_prefix: default_file_prefix(),
            first_index: default_first_index(),
            format: OutputFormat::default(),
            mode: CaptureMode::default(),
            screenshot_name: default_screenshot_name(),
            write_positions: default_write_positions(),
            positions_file: default_positions_file(),
        }
    }
}

/// How rotated primitives are captured.
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct CaptureConfig {
    /// `canvas` rotates the primitive before drawing, `snapshot` rotates the saved image
    #[serde(default)]
    pub rotation: RotationMode,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_size() -> i32 {
    800
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_thickness() -> i32 {
    1
}

fn default_output_directory() -> String {
    "~/Pictures/sketchcap".to_string()
}

fn default_file_prefix() -> String {
    "drawing_".to_string()
}

fn default_first_index() -> u32 {
    1
}

fn default_screenshot_name() -> String {
    "screenshot".to_string()
}

fn default_write_positions() -> bool {
    true
}

fn default_positions_file() -> String {
    "drawing_positions.txt".to_string()
}
