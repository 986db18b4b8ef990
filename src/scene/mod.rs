//! Drawing scenes: TOML lists of cursor commands.
//!
//! A scene document has an optional `start = [x, y]` and a `[[command]]` array.
//! Each command is tagged by `op`:
//!
//! ```toml
//! start = [100, 100]
//!
//! [[command]]
//! op = "color"
//! color = [255, 0, 0]
//!
//! [[command]]
//! op = "circle"
//! radius = 40
//! ```

use crate::config::{ColorSpec, MAX_THICKNESS};
use crate::cursor::Cursor;
use crate::draw::Primitive;
use crate::session::Session;
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEMO_SCENE: &str = include_str!("../../scenes/demo.toml");

/// Largest magnitude allowed for scene sizes and distances.
pub const MAX_EXTENT: i32 = 1_000_000;

/// A parsed scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Cursor position before the first command; the caller's default is used when absent.
    #[serde(default)]
    pub start: Option<[i32; 2]>,

    #[serde(default, rename = "command")]
    pub commands: Vec<Command>,
}

/// One cursor command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Command {
    Move { x: i32, y: i32 },
    Heading { degrees: i32 },
    Turn { degrees: i32 },
    Forward { distance: i32 },
    Color { color: ColorSpec },
    Thickness { value: i32 },
    Circle { radius: i32 },
    FilledCircle { radius: i32 },
    Ellipse { rx: i32, ry: i32 },
    FilledEllipse { rx: i32, ry: i32 },
    Rectangle { width: i32, height: i32 },
    Box { width: i32, height: i32 },
    RoundedRectangle { width: i32, height: i32, radius: i32 },
    RoundedBox { width: i32, height: i32, radius: i32 },
    Segment { length: i32 },
    /// The cursor position is the first vertex; the other two are given here.
    Triangle { x0: i32, y0: i32, x1: i32, y1: i32 },
}

impl Command {
    /// Short name used in log messages.
    pub fn op(&self) -> &'static str {
        match self {
            Command::Move { .. } => "move",
            Command::Heading { .. } => "heading",
            Command::Turn { .. } => "turn",
            Command::Forward { .. } => "forward",
            Command::Color { .. } => "color",
            Command::Thickness { .. } => "thickness",
            Command::Circle { .. } => "circle",
            Command::FilledCircle { .. } => "filled-circle",
            Command::Ellipse { .. } => "ellipse",
            Command::FilledEllipse { .. } => "filled-ellipse",
            Command::Rectangle { .. } => "rectangle",
            Command::Box { .. } => "box",
            Command::RoundedRectangle { .. } => "rounded-rectangle",
            Command::RoundedBox { .. } => "rounded-box",
            Command::Segment { .. } => "segment",
            Command::Triangle { .. } => "triangle",
        }
    }

    /// Primitive this command draws from the cursor's current state, if it draws at all.
    pub fn primitive(&self, cursor: &Cursor) -> Option<Primitive> {
        let primitive = match *self {
            Command::Circle { radius } => cursor.circle(radius),
            Command::FilledCircle { radius } => cursor.filled_circle(radius),
            Command::Ellipse { rx, ry } => cursor.ellipse(rx, ry),
            Command::FilledEllipse { rx, ry } => cursor.filled_ellipse(rx, ry),
            Command::Rectangle { width, height } => cursor.rectangle(width, height),
            Command::Box { width, height } => cursor.filled_box(width, height),
            Command::RoundedRectangle {
                width,
                height,
                radius,
            } => cursor.rounded_rectangle(width, height, radius),
            Command::RoundedBox {
                width,
                height,
                radius,
            } => cursor.rounded_box(width, height, radius),
            Command::Segment { length } => cursor.segment(length),
            Command::Triangle { x0, y0, x1, y1 } => cursor.triangle(x0, y0, x1, y1),
            _ => return None,
        };
        Some(primitive)
    }

    /// Applies a state-changing command to the cursor. Drawing commands are no-ops here.
    pub fn apply(&self, cursor: &mut Cursor) -> Result<()> {
        match self {
            Command::Move { x, y } => cursor.move_to(*x, *y),
            Command::Heading { degrees } => cursor.set_heading(*degrees),
            Command::Turn { degrees } => cursor.turn(*degrees),
            Command::Forward { distance } => cursor.forward(*distance),
            Command::Color { color } => {
                let color = color
                    .resolve()
                    .ok_or_else(|| anyhow!("unknown color '{}'", color))?;
                cursor.set_color_value(color);
            }
            Command::Thickness { value } => cursor.set_thickness(*value),
            _ => {}
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        match self {
            Command::Color { color } if color.resolve().is_none() => {
                bail!("unknown color '{}'", color)
            }
            Command::Thickness { value } if !(1..=MAX_THICKNESS).contains(value) => {
                bail!("thickness must be within 1-{}, got {}", MAX_THICKNESS, value)
            }
            Command::Circle { radius } | Command::FilledCircle { radius } => {
                check_radius("radius", *radius)
            }
            Command::Ellipse { rx, ry } | Command::FilledEllipse { rx, ry } => {
                check_radius("rx", *rx)?;
                check_radius("ry", *ry)
            }
            Command::Rectangle { width, height } | Command::Box { width, height } => {
                check_extent("width", *width)?;
                check_extent("height", *height)
            }
            Command::RoundedRectangle {
                width,
                height,
                radius,
            }
            | Command::RoundedBox {
                width,
                height,
                radius,
            } => {
                check_extent("width", *width)?;
                check_extent("height", *height)?;
                check_radius("radius", *radius)
            }
            Command::Segment { length } => check_extent("length", *length),
            Command::Forward { distance } => check_extent("distance", *distance),
            _ => Ok(()),
        }
    }
}

fn check_extent(name: &str, value: i32) -> Result<()> {
    if value.unsigned_abs() > MAX_EXTENT as u32 {
        bail!("{} must be within ±{}, got {}", name, MAX_EXTENT, value);
    }
    Ok(())
}

fn check_radius(name: &str, value: i32) -> Result<()> {
    if value < 0 {
        bail!("{} must not be negative, got {}", name, value);
    }
    check_extent(name, value)
}

/// Outcome of running a scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Commands executed, drawing or not.
    pub executed: usize,
    /// Drawing commands whose capture failed, by command index.
    pub failures: Vec<usize>,
}

impl Scene {
    /// The built-in demo scene.
    pub fn demo() -> Result<Self> {
        DEMO_SCENE.parse().context("Built-in demo scene is invalid")
    }

    /// Reads and parses a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene from {}", path.display()))?;
        source
            .parse()
            .with_context(|| format!("Failed to parse scene from {}", path.display()))
    }

    /// Number of commands that produce a primitive.
    pub fn drawing_commands(&self) -> usize {
        let probe = Cursor::new(0, 0);
        self.commands
            .iter()
            .filter(|command| command.primitive(&probe).is_some())
            .count()
    }

    /// Executes every command against `cursor` and `session`.
    ///
    /// A failed capture is logged and the run continues, unless `strict` is set,
    /// in which case the first failure aborts the run.
    pub fn run(
        &self,
        cursor: &mut Cursor,
        session: &mut Session,
        strict: bool,
    ) -> Result<RunReport> {
        if let Some([x, y]) = self.start {
            cursor.move_to(x, y);
        }

        let mut report = RunReport::default();
        for (index, command) in self.commands.iter().enumerate() {
            report.executed += 1;

            let Some(primitive) = command.primitive(cursor) else {
                command
                    .apply(cursor)
                    .with_context(|| format!("command {} ({})", index, command.op()))?;
                continue;
            };

            match session.draw(cursor.position(), &primitive) {
                Ok(Some(path)) => {
                    log::debug!("command {} ({}) -> {}", index, command.op(), path.display())
                }
                Ok(None) => {}
                Err(err) if strict => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("command {} ({}) failed", index, command.op())));
                }
                Err(err) => {
                    log::warn!("command {} ({}) failed: {}", index, command.op(), err);
                    report.failures.push(index);
                }
            }
        }

        Ok(report)
    }
}

impl std::str::FromStr for Scene {
    type Err = anyhow::Error;

    fn from_str(source: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(source)?;
        for (index, command) in scene.commands.iter().enumerate() {
            command
                .validate()
                .with_context(|| format!("command {} ({})", index, command.op()))?;
        }
        Ok(scene)
    }
}
