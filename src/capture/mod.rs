//! Capture-and-save pipeline for drawn primitives.
//!
//! This module provides:
//! - Pixel readback of a primitive's clamped capture region into a [`Tile`]
//! - Optional rotation of the captured tile
//! - BMP/PNG persistence with sequential file naming
//! - Whole-canvas screenshots

pub mod file;
pub mod pipeline;
pub mod tile;
pub mod types;

#[cfg(test)]
mod tests;

pub use file::ShapeFiles;
pub use pipeline::{CaptureOptions, capture_and_save, draw_and_capture, save_screenshot};
pub use tile::Tile;
pub use types::{CaptureError, CaptureResult, OutputFormat};
