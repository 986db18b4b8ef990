//! Output locations for captured shapes: directories and sequential file names.

use super::types::{CaptureError, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// Sequentially numbered output files: `<directory>/<prefix><n>.<ext>`.
///
/// The counter only moves when a save is confirmed with [`ShapeFiles::advance`],
/// so a failed save leaves no gap in the numbering.
#[derive(Debug, Clone)]
pub struct ShapeFiles {
    directory: PathBuf,
    prefix: String,
    format: OutputFormat,
    next_index: u32,
}

impl ShapeFiles {
    pub fn new(
        directory: impl Into<PathBuf>,
        prefix: impl Into<String>,
        format: OutputFormat,
        first_index: u32,
    ) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            format,
            next_index: first_index,
        }
    }

    /// Path the next capture should be written to.
    pub fn next_path(&self) -> PathBuf {
        self.directory.join(numbered_filename(
            &self.prefix,
            self.next_index,
            self.format,
        ))
    }

    /// Index the next capture will carry.
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Marks the current path as used.
    pub fn advance(&mut self) {
        self.next_index += 1;
    }
}

/// Builds `<prefix><index>.<ext>`.
pub fn numbered_filename(prefix: &str, index: u32, format: OutputFormat) -> String {
    format!("{}{}.{}", prefix, index, format.extension())
}

/// Ensure the output directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|err| CaptureError::file_write(directory, err))?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_filename_uses_extension() {
        assert_eq!(
            numbered_filename("drawing_", 7, OutputFormat::Bmp),
            "drawing_7.bmp"
        );
        assert_eq!(numbered_filename("s", 1, OutputFormat::Png), "s1.png");
    }

    #[test]
    fn shape_files_advance_one_at_a_time() {
        let mut files = ShapeFiles::new("/tmp/out", "drawing_", OutputFormat::Bmp, 1);
        assert_eq!(files.next_path(), PathBuf::from("/tmp/out/drawing_1.bmp"));
        assert_eq!(files.next_path(), PathBuf::from("/tmp/out/drawing_1.bmp"));

        files.advance();
        assert_eq!(files.next_index(), 2);
        assert_eq!(files.next_path(), PathBuf::from("/tmp/out/drawing_2.bmp"));
    }

    #[test]
    fn ensure_directory_creates_nested_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        let created = ensure_directory_exists(&nested).unwrap();
        assert!(created.is_dir());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }
}
