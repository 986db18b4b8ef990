//! Data types for shape capture.

use crate::util::Rect;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Image encoding used for saved captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Uncompressed 32-bit bitmap.
    #[default]
    Bmp,
    /// PNG through Cairo's encoder.
    Png,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Bmp => "bmp",
            OutputFormat::Png => "png",
        }
    }
}

/// Result of a successful capture-and-save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    /// Path the image was written to.
    pub saved_path: PathBuf,
    /// Canvas region that was read back, after clamping.
    pub region: Rect,
    /// Pixel width of the saved image (differs from the region when the tile was rotated).
    pub width: i32,
    /// Pixel height of the saved image.
    pub height: i32,
}

/// Errors that can occur while drawing, capturing or saving one primitive.
///
/// Each error is local to a single capture; the caller decides whether to
/// keep drawing.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to allocate {width}x{height} pixel buffer: {source}")]
    SurfaceAllocation {
        width: i32,
        height: i32,
        #[source]
        source: cairo::Error,
    },

    #[error("Failed to read back pixels: {0}")]
    PixelReadback(String),

    #[error("Failed to rotate captured tile by {degrees} degrees: {source}")]
    Rotation {
        degrees: i32,
        #[source]
        source: cairo::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Capture region {0:?} does not intersect the canvas")]
    OffCanvas(Rect),

    #[error("Drawing failed: {0}")]
    Render(#[source] cairo::Error),
}

impl CaptureError {
    pub(crate) fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CaptureError::FileWrite {
            path: path.into(),
            source,
        }
    }
}
