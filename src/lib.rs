//! Cursor-driven 2D shape drawing with per-shape bitmap capture.
//!
//! A [`Cursor`] draws primitives onto a Cairo-backed [`Canvas`]; every primitive
//! can be cropped to its bounding region and written to disk as BMP or PNG.
//! [`Session`] and [`Scene`] build batch runs on top of that, and [`Config`]
//! holds the user settings shared by the binary and library callers.

pub mod capture;
pub mod config;
pub mod cursor;
pub mod draw;
pub mod scene;
pub mod session;
pub mod util;

pub use capture::{CaptureError, CaptureOptions, CaptureResult, OutputFormat};
pub use config::Config;
pub use cursor::Cursor;
pub use draw::{Canvas, Color, Primitive, RotationMode, Shape};
pub use scene::Scene;
pub use session::{Session, SessionOptions, SessionSummary};
