//! Draw → present → read back → rotate → save → clear.

use std::ops::{Deref, DerefMut};
use std::path::Path;

use crate::capture::{
    tile::Tile,
    types::{CaptureError, CaptureResult, OutputFormat},
};
use crate::draw::{Canvas, Primitive, RotationMode};
use crate::util::Rect;

/// Knobs shared by every capture in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureOptions {
    pub rotation: RotationMode,
    pub format: OutputFormat,
}

/// Clears the wrapped canvas when dropped, whichever way the capture exits.
struct ClearOnExit<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for ClearOnExit<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for ClearOnExit<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for ClearOnExit<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.canvas.clear() {
            log::warn!("Failed to clear canvas after capture: {}", err);
        }
    }
}

/// Draws one primitive, saves its capture region to `path` and clears the canvas.
///
/// The canvas is reset to its background on every exit path, so the next
/// primitive starts on a blank surface even when this one failed.
pub fn draw_and_capture(
    canvas: &mut Canvas,
    primitive: &Primitive,
    path: &Path,
    options: &CaptureOptions,
) -> Result<CaptureResult, CaptureError> {
    let mut canvas = ClearOnExit { canvas };

    canvas.draw(primitive, options.rotation)?;
    canvas.present();

    let region = primitive.capture_region(options.rotation);
    log::debug!(
        "Captured {} at {:?} (angle {}, thickness {})",
        primitive.shape.kind(),
        region,
        primitive.angle,
        primitive.thickness
    );

    capture_and_save(
        &canvas,
        region,
        primitive.tile_angle(options.rotation),
        path,
        options.format,
    )
}

/// Clamps `region` to the canvas, reads it back, rotates the tile by
/// `angle` degrees and writes it to `path`.
///
/// Does not draw or clear; the canvas is left as it was.
pub fn capture_and_save(
    canvas: &Canvas,
    region: Rect,
    angle: i32,
    path: &Path,
    format: OutputFormat,
) -> Result<CaptureResult, CaptureError> {
    let clamped = region.clamp_to(canvas.width(), canvas.height());
    if !clamped.is_valid() {
        return Err(CaptureError::OffCanvas(region));
    }

    let tile = canvas.read_region(clamped)?;
    let tile = tile.rotate(angle)?;
    save_tile(&tile, clamped, path, format)
}

/// Saves the whole canvas to `path`.
pub fn save_screenshot(
    canvas: &Canvas,
    path: &Path,
    format: OutputFormat,
) -> Result<CaptureResult, CaptureError> {
    let tile = canvas.snapshot()?;
    save_tile(&tile, canvas.bounds(), path, format)
}

fn save_tile(
    tile: &Tile,
    region: Rect,
    path: &Path,
    format: OutputFormat,
) -> Result<CaptureResult, CaptureError> {
    tile.write(path, format)?;

    log::info!(
        "Saved {}x{} capture to {}",
        tile.width(),
        tile.height(),
        path.display()
    );

    Ok(CaptureResult {
        saved_path: path.to_path_buf(),
        region,
        width: tile.width(),
        height: tile.height(),
    })
}
