use crate::capture::CaptureError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Companion text file listing the cursor position of every drawn primitive,
/// one `x,y` pair per line in draw order.
#[derive(Debug)]
pub struct PositionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    entries: usize,
}

impl PositionLog {
    /// Creates (or truncates) the log file.
    pub fn create(path: &Path) -> Result<Self, CaptureError> {
        let file = File::create(path).map_err(|err| CaptureError::file_write(path, err))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            entries: 0,
        })
    }

    pub fn record(&mut self, x: i32, y: i32) -> Result<(), CaptureError> {
        writeln!(self.writer, "{x},{y}").map_err(|err| CaptureError::file_write(&self.path, err))?;
        self.entries += 1;
        Ok(())
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffered lines and returns the log path.
    pub fn finish(mut self) -> Result<PathBuf, CaptureError> {
        self.writer
            .flush()
            .map_err(|err| CaptureError::file_write(&self.path, err))?;
        Ok(self.path)
    }
}
