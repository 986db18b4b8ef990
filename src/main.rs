use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use sketchcap::config::CaptureMode;
use sketchcap::draw::{BLACK, WHITE};
use sketchcap::session::options_from_config;
use sketchcap::{Canvas, Config, Cursor, OutputFormat, RotationMode, Scene, Session};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchcap")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHCAP_GIT_HASH"), ")"),
    about = "Draw cursor-driven shape scenes and save each shape as an image"
)]
struct Cli {
    /// Scene file to run (TOML). Runs the built-in demo scene when omitted
    #[arg(long, short = 's', value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/sketchcap/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory images are written to
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// One image per shape, or a single screenshot at the end
    #[arg(long, short = 'm', value_enum)]
    mode: Option<ModeArg>,

    /// Image format
    #[arg(long, short = 'f', value_enum)]
    format: Option<FormatArg>,

    /// Canvas width in pixels
    #[arg(long, value_name = "PIXELS")]
    width: Option<i32>,

    /// Canvas height in pixels
    #[arg(long, value_name = "PIXELS")]
    height: Option<i32>,

    /// Rotate shapes on the canvas, or rotate the saved snapshot
    #[arg(long, value_enum)]
    rotation: Option<RotationArg>,

    /// Do not write the position log
    #[arg(long, action = ArgAction::SetTrue)]
    no_positions: bool,

    /// Stop at the first shape that fails to save
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    PerShape,
    Screenshot,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Bmp,
    Png,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RotationArg {
    Canvas,
    Snapshot,
}

impl Cli {
    /// Layers command-line overrides on top of the loaded configuration.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.to_string_lossy().into_owned();
        }
        if let Some(mode) = self.mode {
            config.output.mode = match mode {
                ModeArg::PerShape => CaptureMode::PerShape,
                ModeArg::Screenshot => CaptureMode::Screenshot,
            };
        }
        if let Some(format) = self.format {
            config.output.format = match format {
                FormatArg::Bmp => OutputFormat::Bmp,
                FormatArg::Png => OutputFormat::Png,
            };
        }
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if let Some(rotation) = self.rotation {
            config.capture.rotation = match rotation {
                RotationArg::Canvas => RotationMode::Canvas,
                RotationArg::Snapshot => RotationMode::Snapshot,
            };
        }
        if self.no_positions {
            config.output.write_positions = false;
        }
        config.validate_and_clamp();
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_overrides(&mut config);

    let scene = match &cli.scene {
        Some(path) => Scene::load(path)?,
        None => {
            log::info!("No scene given, running the built-in demo");
            Scene::demo()?
        }
    };

    let canvas = Canvas::new(
        config.canvas.width,
        config.canvas.height,
        config.canvas.background.to_color(WHITE),
    )
    .context("Failed to create canvas")?;

    let mut cursor = Cursor::new(canvas.width() / 2, canvas.height() / 2);
    cursor.set_color_value(config.drawing.default_color.to_color(BLACK));
    cursor.set_thickness(config.drawing.default_thickness);

    let options = options_from_config(&config.output, &config.capture)?;
    let output_dir = options.output_dir.clone();
    let mut session =
        Session::new(canvas, options).context("Failed to prepare output directory")?;

    let report = scene.run(&mut cursor, &mut session, cli.strict)?;
    let summary = session.finish().context("Failed to finish session")?;

    match &summary.screenshot {
        Some(path) => println!("Saved screenshot to {}", path.display()),
        None => println!(
            "Saved {} image(s) to {}",
            summary.saved.len(),
            output_dir.display()
        ),
    }
    if let Some(path) = &summary.positions {
        println!("Wrote positions to {}", path.display());
    }
    if !report.failures.is_empty() {
        println!("{} shape(s) could not be saved", report.failures.len());
    }

    Ok(())
}
