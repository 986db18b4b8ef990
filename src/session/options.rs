use crate::capture::{CaptureOptions, OutputFormat, file::expand_tilde};
use crate::config::{CaptureConfig, CaptureMode, OutputConfig};
use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// Runtime options derived from configuration for a drawing session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub first_index: u32,
    pub mode: CaptureMode,
    pub capture: CaptureOptions,
    pub screenshot_name: String,
    /// File name of the position log inside `output_dir`; `None` disables it.
    pub positions_file: Option<String>,
}

impl SessionOptions {
    /// Creates a basic options struct with the documented defaults. Intended mainly for tests.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            file_prefix: "drawing_".to_string(),
            first_index: 1,
            mode: CaptureMode::PerShape,
            capture: CaptureOptions::default(),
            screenshot_name: "screenshot".to_string(),
            positions_file: Some("drawing_positions.txt".to_string()),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.capture.format
    }

    pub fn screenshot_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}.{}",
            self.screenshot_name,
            self.format().extension()
        ))
    }

    pub fn positions_path(&self) -> Option<PathBuf> {
        self.positions_file
            .as_ref()
            .map(|name| self.output_dir.join(name))
    }
}

/// Build runtime session options from configuration values.
pub fn options_from_config(
    output_cfg: &OutputConfig,
    capture_cfg: &CaptureConfig,
) -> Result<SessionOptions> {
    let output_dir = expand_tilde(&output_cfg.directory);
    if output_dir.as_os_str().is_empty() {
        return Err(anyhow!("output.directory resolved to an empty path"));
    }

    let mut options = SessionOptions::new(output_dir);
    options.file_prefix = output_cfg.file_prefix.clone();
    options.first_index = output_cfg.first_index;
    options.mode = output_cfg.mode;
    options.capture = CaptureOptions {
        rotation: capture_cfg.rotation,
        format: output_cfg.format,
    };
    options.screenshot_name = output_cfg.screenshot_name.clone();
    options.positions_file = output_cfg
        .write_positions
        .then(|| output_cfg.positions_file.clone());

    Ok(options)
}
