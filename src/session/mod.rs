//! Drawing sessions over a single canvas.
//!
//! A session owns the canvas and decides what reaches disk: one numbered image
//! per primitive, or a single screenshot once drawing is finished. It also keeps
//! the optional position log that records where the cursor stood for every
//! primitive.

mod options;
mod positions;

pub use options::{SessionOptions, options_from_config};
pub use positions::PositionLog;

use crate::capture::{
    CaptureError, ShapeFiles, draw_and_capture, file::ensure_directory_exists, save_screenshot,
};
use crate::config::CaptureMode;
use crate::draw::{Canvas, Primitive};
use std::path::PathBuf;

/// What a finished session produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Primitives handed to the session, including the ones that failed to save.
    pub drawn: usize,
    /// Per-shape images in the order they were written.
    pub saved: Vec<PathBuf>,
    /// Primitives whose capture failed.
    pub failed: usize,
    pub screenshot: Option<PathBuf>,
    pub positions: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Session {
    canvas: Canvas,
    options: SessionOptions,
    files: ShapeFiles,
    positions: Option<PositionLog>,
    summary: SessionSummary,
}

impl Session {
    /// Creates the output directory and opens the position log if enabled.
    pub fn new(canvas: Canvas, options: SessionOptions) -> Result<Self, CaptureError> {
        ensure_directory_exists(&options.output_dir)?;

        let files = ShapeFiles::new(
            options.output_dir.clone(),
            options.file_prefix.clone(),
            options.format(),
            options.first_index,
        );

        let positions = match options.positions_path() {
            Some(path) => Some(PositionLog::create(&path)?),
            None => None,
        };

        log::debug!(
            "Session started: {:?} mode, {}x{} canvas, output {}",
            options.mode,
            canvas.width(),
            canvas.height(),
            options.output_dir.display()
        );

        Ok(Self {
            canvas,
            options,
            files,
            positions,
            summary: SessionSummary::default(),
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Index the next per-shape image will carry.
    pub fn next_index(&self) -> u32 {
        self.files.next_index()
    }

    /// Draws one primitive that was issued with the cursor at `cursor_position`.
    ///
    /// In per-shape mode the primitive is captured and saved immediately and the
    /// saved path is returned; the file counter only advances on success. In
    /// screenshot mode the primitive stays on the canvas and `None` is returned.
    pub fn draw(
        &mut self,
        cursor_position: (i32, i32),
        primitive: &Primitive,
    ) -> Result<Option<PathBuf>, CaptureError> {
        self.summary.drawn += 1;
        if let Some(log) = self.positions.as_mut() {
            log.record(cursor_position.0, cursor_position.1)?;
        }

        match self.options.mode {
            CaptureMode::PerShape => {
                let path = self.files.next_path();
                match draw_and_capture(&mut self.canvas, primitive, &path, &self.options.capture)
                {
                    Ok(result) => {
                        self.files.advance();
                        self.summary.saved.push(result.saved_path.clone());
                        Ok(Some(result.saved_path))
                    }
                    Err(err) => {
                        self.summary.failed += 1;
                        Err(err)
                    }
                }
            }
            CaptureMode::Screenshot => {
                self.canvas
                    .draw(primitive, self.options.capture.rotation)
                    .inspect_err(|_| self.summary.failed += 1)?;
                Ok(None)
            }
        }
    }

    /// Writes the screenshot (screenshot mode), flushes the position log and
    /// reports what was produced.
    pub fn finish(mut self) -> Result<SessionSummary, CaptureError> {
        if self.options.mode == CaptureMode::Screenshot {
            self.canvas.present();
            let result = save_screenshot(
                &self.canvas,
                &self.options.screenshot_path(),
                self.options.format(),
            )?;
            self.summary.screenshot = Some(result.saved_path);
        }

        if let Some(log) = self.positions.take() {
            let entries = log.entries();
            let path = log.finish()?;
            log::info!("Wrote {} positions to {}", entries, path.display());
            self.summary.positions = Some(path);
        }

        Ok(self.summary)
    }
}

#[cfg(test)]
mod tests;
