//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: 8-bit RGBA color with predefined constants
//! - [`Shape`]: the drawable primitives and their capture-region formulas
//! - [`Primitive`]: a shape plus the stroke state it is drawn with
//! - [`Canvas`]: the software surface primitives are rasterized onto
//! - Rendering functions for Cairo-based output

pub mod canvas;
pub mod color;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use canvas::Canvas;
pub use color::Color;
pub use render::{render_background, render_primitive};
pub use shape::{Primitive, RotationMode, Shape};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
