//! Configuration file support for sketchcap.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchcap/config.toml`. Settings include the canvas size, the
//! starting stroke, output naming and rotation handling.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{CaptureMode, ColorSpec};
pub use types::{CanvasConfig, CaptureConfig, DrawingConfig, OutputConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_CANVAS_SIZE: i32 = 16_384;
pub const MAX_THICKNESS: i32 = 256;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 800
/// height = 800
/// background = "white"
///
/// [drawing]
/// default_color = "black"
/// default_thickness = 1
///
/// [output]
/// directory = "~/Pictures/sketchcap"
/// format = "bmp"
/// mode = "per-shape"
///
/// [capture]
/// rotation = "canvas"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Initial cursor color and thickness
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Output location, naming and mode
    #[serde(default)]
    pub output: OutputConfig,

    /// Rotation handling
    #[serde(default)]
    pub capture: CaptureConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 16384
    /// - `drawing.default_thickness`: 1 - 256
    /// - `output.screenshot_name`, `output.positions_file`: non-empty
    pub fn validate_and_clamp(&mut self) {
        if !(1..=MAX_CANVAS_SIZE).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width,
                MAX_CANVAS_SIZE
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_SIZE);
        }

        if !(1..=MAX_CANVAS_SIZE).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height,
                MAX_CANVAS_SIZE
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_SIZE);
        }

        if !(1..=MAX_THICKNESS).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {}, clamping to 1-{} range",
                self.drawing.default_thickness,
                MAX_THICKNESS
            );
            self.drawing.default_thickness =
                self.drawing.default_thickness.clamp(1, MAX_THICKNESS);
        }

        if self.output.screenshot_name.trim().is_empty() {
            log::warn!("Empty screenshot_name, falling back to 'screenshot'");
            self.output.screenshot_name = "screenshot".to_string();
        }

        if self.output.positions_file.trim().is_empty() {
            log::warn!("Empty positions_file, falling back to 'drawing_positions.txt'");
            self.output.positions_file = "drawing_positions.txt".to_string();
        }

        if self.canvas.background.resolve().is_none() {
            log::warn!(
                "Unknown canvas background '{}', falling back to 'white'",
                self.canvas.background
            );
            self.canvas.background = ColorSpec::Name("white".to_string());
        }

        if self.drawing.default_color.resolve().is_none() {
            log::warn!(
                "Unknown default_color '{}', falling back to 'black'",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::Name("black".to_string());
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchcap/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchcap");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path. The file must exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
