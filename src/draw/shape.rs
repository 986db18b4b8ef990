//! Shape definitions and their capture regions.

use super::color::Color;
use crate::util::{Rect, saturate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a non-zero primitive angle is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RotationMode {
    /// Rotate the primitive about its pivot before rasterizing it. The saved
    /// snapshot shows exactly what is on the canvas.
    #[default]
    Canvas,
    /// Draw the primitive unrotated and rotate the captured tile instead.
    /// The canvas and the saved image disagree for rotated shapes.
    Snapshot,
}

/// Represents one drawable primitive.
///
/// Each variant carries only its geometry; color, stroke thickness and angle
/// live on the enclosing [`Primitive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle outline centered on (cx, cy)
    Circle { cx: i32, cy: i32, radius: i32 },
    /// Solid disc centered on (cx, cy)
    FilledCircle { cx: i32, cy: i32, radius: i32 },
    /// Ellipse outline centered on (cx, cy)
    Ellipse { cx: i32, cy: i32, rx: i32, ry: i32 },
    /// Solid ellipse centered on (cx, cy)
    FilledEllipse { cx: i32, cy: i32, rx: i32, ry: i32 },
    /// Straight line between two points
    Segment { x0: i32, y0: i32, x1: i32, y1: i32 },
    /// Rectangle outline anchored at its top-left corner
    Rectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// Solid rectangle anchored at its top-left corner
    Box {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// Rectangle outline with rounded corners
    RoundedRectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        radius: i32,
    },
    /// Solid rectangle with rounded corners
    RoundedBox {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        radius: i32,
    },
    /// Triangle outline through three vertices
    Triangle {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
}

impl Shape {
    /// Short lowercase name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::FilledCircle { .. } => "filled-circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::FilledEllipse { .. } => "filled-ellipse",
            Shape::Segment { .. } => "segment",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Box { .. } => "box",
            Shape::RoundedRectangle { .. } => "rounded-rectangle",
            Shape::RoundedBox { .. } => "rounded-box",
            Shape::Triangle { .. } => "triangle",
        }
    }

    /// Returns the unrotated, unclamped axis-aligned capture region.
    ///
    /// `thickness` only matters for segments, whose box is inflated by the
    /// stroke width on every side. Outline strokes of the other shapes are
    /// inset, so their boxes do not grow.
    pub fn capture_region(&self, thickness: i32) -> Rect {
        match *self {
            Shape::Circle { cx, cy, radius } | Shape::FilledCircle { cx, cy, radius } => {
                centered_region(cx, cy, radius, radius)
            }
            Shape::Ellipse { cx, cy, rx, ry } | Shape::FilledEllipse { cx, cy, rx, ry } => {
                centered_region(cx, cy, rx, ry)
            }
            Shape::Segment { x0, y0, x1, y1 } => {
                let t = thickness as i64;
                let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
                Rect::new(
                    saturate(x0.min(x1) - t),
                    saturate(y0.min(y1) - t),
                    saturate((x1 - x0).abs() + 2 * t),
                    saturate((y1 - y0).abs() + 2 * t),
                )
            }
            Shape::Rectangle {
                x,
                y,
                width,
                height,
            }
            | Shape::Box {
                x,
                y,
                width,
                height,
            }
            | Shape::RoundedRectangle {
                x,
                y,
                width,
                height,
                ..
            }
            | Shape::RoundedBox {
                x,
                y,
                width,
                height,
                ..
            } => Rect::normalized(x, y, width, height),
            Shape::Triangle {
                x0,
                y0,
                x1,
                y1,
                x2,
                y2,
            } => Rect::from_min_max(
                x0.min(x1).min(x2),
                y0.min(y1).min(y2),
                x0.max(x1).max(x2),
                y0.max(y1).max(y2),
            ),
        }
    }

    /// Point (in Cairo user space) the shape rotates about.
    ///
    /// Centered shapes pivot on the center of their anchor pixel, boxes on
    /// their anchored corner and triangles on their first vertex.
    pub fn pivot(&self) -> (f64, f64) {
        match *self {
            Shape::Circle { cx, cy, .. }
            | Shape::FilledCircle { cx, cy, .. }
            | Shape::Ellipse { cx, cy, .. }
            | Shape::FilledEllipse { cx, cy, .. } => pixel_center(cx, cy),
            Shape::Segment { x0, y0, .. } | Shape::Triangle { x0, y0, .. } => {
                pixel_center(x0, y0)
            }
            Shape::Rectangle { x, y, .. }
            | Shape::Box { x, y, .. }
            | Shape::RoundedRectangle { x, y, .. }
            | Shape::RoundedBox { x, y, .. } => (x as f64, y as f64),
        }
    }
}

/// `(cx - rx, cy - ry, 2rx + 1, 2ry + 1)`, computed without overflow.
fn centered_region(cx: i32, cy: i32, rx: i32, ry: i32) -> Rect {
    let (rx, ry) = (rx as i64, ry as i64);
    Rect::new(
        saturate(cx as i64 - rx),
        saturate(cy as i64 - ry),
        saturate(2 * rx + 1),
        saturate(2 * ry + 1),
    )
}

/// Cairo coordinate of the center of pixel (x, y).
pub(crate) fn pixel_center(x: i32, y: i32) -> (f64, f64) {
    (x as f64 + 0.5, y as f64 + 0.5)
}

/// A shape together with the stroke state it is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    pub shape: Shape,
    pub color: Color,
    /// Stroke width in pixels; ignored by filled shapes.
    pub thickness: i32,
    /// Rotation in degrees, clockwise in screen space.
    pub angle: i32,
}

impl Primitive {
    pub fn new(shape: Shape, color: Color, thickness: i32) -> Self {
        Self {
            shape,
            color,
            thickness,
            angle: 0,
        }
    }

    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    /// Returns the unclamped capture region for the given rotation mode.
    ///
    /// In [`RotationMode::Canvas`] a rotated primitive covers the hull of its
    /// rotated box. In [`RotationMode::Snapshot`] the primitive is drawn
    /// unrotated, so the plain formula applies.
    pub fn capture_region(&self, mode: RotationMode) -> Rect {
        let region = self.shape.capture_region(self.thickness);
        match mode {
            RotationMode::Canvas => region.rotated_hull(self.shape.pivot(), self.angle),
            RotationMode::Snapshot => region,
        }
    }

    /// Angle to apply while rasterizing under `mode`.
    pub fn draw_angle(&self, mode: RotationMode) -> i32 {
        match mode {
            RotationMode::Canvas => self.angle,
            RotationMode::Snapshot => 0,
        }
    }

    /// Angle to apply to the captured tile under `mode`.
    pub fn tile_angle(&self, mode: RotationMode) -> i32 {
        match mode {
            RotationMode::Canvas => 0,
            RotationMode::Snapshot => self.angle,
        }
    }
}
