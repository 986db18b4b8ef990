//! Geometry helpers shared by the cursor, the shape renderer and the capture pipeline.
//!
//! This module provides:
//! - [`Rect`], the axis-aligned capture region, with canvas clamping
//! - Heading/endpoint trigonometry for the cursor
//! - Rotation of points and rectangles about a pivot

// ============================================================================
// Heading Geometry
// ============================================================================

/// Snaps values that are within floating-point noise of an integer.
///
/// `cos(90°)` evaluates to roughly `6e-17`, which would otherwise push an
/// exact pixel edge across a floor/ceil boundary.
fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        rounded
    } else {
        value
    }
}

/// Calculates the point `length` pixels away from `(x, y)` along a heading.
///
/// Headings are in degrees, measured clockwise in screen space (y grows
/// downwards), so 0° points right and 90° points down. The result is rounded
/// to the nearest pixel.
///
/// # Arguments
/// * `x` - Start X coordinate
/// * `y` - Start Y coordinate
/// * `heading_degrees` - Direction of travel
/// * `length` - Distance in pixels (negative values travel backwards)
pub fn point_along_heading(x: i32, y: i32, heading_degrees: i32, length: i32) -> (i32, i32) {
    let radians = (heading_degrees as f64).to_radians();
    let dx = length as f64 * radians.cos();
    let dy = length as f64 * radians.sin();
    // Float-to-int casts saturate, so far-off endpoints pin to the i32 range.
    (
        (x as f64 + dx.round()) as i32,
        (y as f64 + dy.round()) as i32,
    )
}

/// Rotates `(px, py)` about `pivot` by `degrees`, clockwise in screen space.
pub fn rotate_point(px: f64, py: f64, pivot: (f64, f64), degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let dx = px - pivot.0;
    let dy = py - pivot.1;
    (
        snap(pivot.0 + dx * cos - dy * sin),
        snap(pivot.1 + dx * sin + dy * cos),
    )
}

/// Returns true when `degrees` describes a whole number of turns.
pub fn is_identity_rotation(degrees: i32) -> bool {
    degrees % 360 == 0
}

/// Narrows an `i64` to `i32`, saturating at the bounds.
pub fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

// ============================================================================
// Capture Region
// ============================================================================

/// Axis-aligned rectangle describing the pixels a primitive may touch.
///
/// Before clamping the origin may be negative and the extent may run past
/// the canvas; after [`Rect::clamp_to`] it lies inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new(
            min_x,
            min_y,
            saturate(max_x as i64 - min_x as i64),
            saturate(max_y as i64 - min_y as i64),
        )
    }

    /// Builds a rectangle from an anchor and a signed extent. A negative
    /// width or height extends left or up from the anchor.
    pub fn normalized(x: i32, y: i32, width: i32, height: i32) -> Self {
        let (x, width) = normalize_axis(x, width);
        let (y, height) = normalize_axis(y, height);
        Self::new(x, y, width, height)
    }

    /// Clamps the rectangle to a `canvas_width` x `canvas_height` canvas.
    ///
    /// A negative origin shrinks the extent by the overhang and moves to 0;
    /// an extent running past the far edge is cut back to it. Clamping an
    /// in-bounds rectangle returns it unchanged. A rectangle that misses the
    /// canvas entirely comes back with zero width or height.
    pub fn clamp_to(self, canvas_width: i32, canvas_height: i32) -> Rect {
        let (x, width) = clamp_axis(self.x, self.width, canvas_width);
        let (y, height) = clamp_axis(self.y, self.height, canvas_height);
        Rect::new(x, y, width, height)
    }

    /// Smallest pixel-aligned rectangle covering this one after rotating it
    /// about `pivot` by `degrees` (clockwise in screen space).
    pub fn rotated_hull(self, pivot: (f64, f64), degrees: i32) -> Rect {
        if is_identity_rotation(degrees) {
            return self;
        }

        let x0 = self.x as f64;
        let y0 = self.y as f64;
        let x1 = x0 + self.width as f64;
        let y1 = y0 + self.height as f64;

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for (cx, cy) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            let (rx, ry) = rotate_point(cx, cy, pivot, degrees as f64);
            min_x = min_x.min(rx);
            min_y = min_y.min(ry);
            max_x = max_x.max(rx);
            max_y = max_y.max(ry);
        }

        Rect::from_min_max(
            min_x.floor() as i32,
            min_y.floor() as i32,
            max_x.ceil() as i32,
            max_y.ceil() as i32,
        )
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Clamps one axis of a rectangle to `0..limit`, in `i64` so that origins
/// and extents near the `i32` bounds cannot overflow.
fn clamp_axis(origin: i32, extent: i32, limit: i32) -> (i32, i32) {
    let limit = limit as i64;
    let mut start = origin as i64;
    let mut len = extent as i64;

    if start < 0 {
        len += start;
        start = 0;
    }
    if start + len > limit {
        len = limit - start;
    }

    (saturate(start.min(limit)), saturate(len.max(0)))
}

fn normalize_axis(origin: i32, extent: i32) -> (i32, i32) {
    if extent >= 0 {
        (origin, extent)
    } else {
        (
            saturate(origin as i64 + extent as i64),
            saturate(-(extent as i64)),
        )
    }
}
