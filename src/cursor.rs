//! Oriented drawing head.
//!
//! A [`Cursor`] carries position, heading, color and stroke thickness, and
//! turns them into [`Primitive`]s. The `draw_*` methods additionally run the
//! capture pipeline, writing the primitive to the given path and clearing
//! the canvas. The cursor never holds on to a canvas, so one cursor can
//! draw onto canvases of different sizes.

use std::path::{Path, PathBuf};

use crate::capture::{CaptureError, CaptureOptions, draw_and_capture};
use crate::draw::{Canvas, Color, Primitive, Shape};
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: i32,
    y: i32,
    heading: i32,
    color: Color,
    thickness: i32,
}

impl Cursor {
    /// Creates a cursor at (x, y) with heading 0, thickness 1 and opaque black.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            heading: 0,
            color: Color::default(),
            thickness: 1,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn heading(&self) -> i32 {
        self.heading
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> i32 {
        self.thickness
    }

    /// Jumps to (x, y) without drawing.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Sets the absolute heading in degrees. Not normalized.
    pub fn set_heading(&mut self, degrees: i32) {
        self.heading = degrees;
    }

    /// Turns by `degrees` relative to the current heading; the result is
    /// kept within `0..360`.
    pub fn turn(&mut self, degrees: i32) {
        self.heading = (self.heading as i64 + degrees as i64).rem_euclid(360) as i32;
    }

    /// Moves `distance` pixels along the heading without drawing.
    pub fn forward(&mut self, distance: i32) {
        let (x, y) = util::point_along_heading(self.x, self.y, self.heading, distance);
        self.move_to(x, y);
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color = Color::new(r, g, b, a);
    }

    pub fn set_color_value(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_thickness(&mut self, thickness: i32) {
        self.thickness = thickness;
    }

    // ------------------------------------------------------------------
    // Primitive builders
    // ------------------------------------------------------------------

    fn primitive(&self, shape: Shape) -> Primitive {
        Primitive::new(shape, self.color, self.thickness)
    }

    /// Ring of outer radius `radius` centered on the cursor.
    pub fn circle(&self, radius: i32) -> Primitive {
        self.primitive(Shape::Circle {
            cx: self.x,
            cy: self.y,
            radius,
        })
    }

    pub fn filled_circle(&self, radius: i32) -> Primitive {
        self.primitive(Shape::FilledCircle {
            cx: self.x,
            cy: self.y,
            radius,
        })
    }

    pub fn ellipse(&self, rx: i32, ry: i32) -> Primitive {
        self.primitive(Shape::Ellipse {
            cx: self.x,
            cy: self.y,
            rx,
            ry,
        })
        .with_angle(self.heading)
    }

    pub fn filled_ellipse(&self, rx: i32, ry: i32) -> Primitive {
        self.primitive(Shape::FilledEllipse {
            cx: self.x,
            cy: self.y,
            rx,
            ry,
        })
        .with_angle(self.heading)
    }

    /// Segment from the cursor, `length` pixels along the heading.
    pub fn segment(&self, length: i32) -> Primitive {
        let (x1, y1) = self.segment_end(length);
        self.primitive(Shape::Segment {
            x0: self.x,
            y0: self.y,
            x1,
            y1,
        })
    }

    /// End point of a segment of `length` drawn from the cursor.
    pub fn segment_end(&self, length: i32) -> (i32, i32) {
        util::point_along_heading(self.x, self.y, self.heading, length)
    }

    /// Rectangle outline anchored at the cursor.
    pub fn rectangle(&self, width: i32, height: i32) -> Primitive {
        self.primitive(Shape::Rectangle {
            x: self.x,
            y: self.y,
            width,
            height,
        })
        .with_angle(self.heading)
    }

    pub fn filled_box(&self, width: i32, height: i32) -> Primitive {
        self.primitive(Shape::Box {
            x: self.x,
            y: self.y,
            width,
            height,
        })
        .with_angle(self.heading)
    }

    pub fn rounded_rectangle(&self, width: i32, height: i32, radius: i32) -> Primitive {
        self.primitive(Shape::RoundedRectangle {
            x: self.x,
            y: self.y,
            width,
            height,
            radius,
        })
        .with_angle(self.heading)
    }

    pub fn rounded_box(&self, width: i32, height: i32, radius: i32) -> Primitive {
        self.primitive(Shape::RoundedBox {
            x: self.x,
            y: self.y,
            width,
            height,
            radius,
        })
        .with_angle(self.heading)
    }

    /// Triangle whose first vertex is the cursor position.
    pub fn triangle(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Primitive {
        self.primitive(Shape::Triangle {
            x0: self.x,
            y0: self.y,
            x1,
            y1,
            x2,
            y2,
        })
        .with_angle(self.heading)
    }

    // ------------------------------------------------------------------
    // Draw-and-save operations
    // ------------------------------------------------------------------

    fn draw(
        &self,
        canvas: &mut Canvas,
        primitive: Primitive,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        draw_and_capture(canvas, &primitive, path, options).map(|result| result.saved_path)
    }

    pub fn draw_circle(
        &self,
        canvas: &mut Canvas,
        radius: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.circle(radius), path, options)
    }

    pub fn draw_filled_circle(
        &self,
        canvas: &mut Canvas,
        radius: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.filled_circle(radius), path, options)
    }

    pub fn draw_ellipse(
        &self,
        canvas: &mut Canvas,
        rx: i32,
        ry: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.ellipse(rx, ry), path, options)
    }

    pub fn draw_filled_ellipse(
        &self,
        canvas: &mut Canvas,
        rx: i32,
        ry: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.filled_ellipse(rx, ry), path, options)
    }

    pub fn draw_segment(
        &self,
        canvas: &mut Canvas,
        length: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.segment(length), path, options)
    }

    pub fn draw_rectangle(
        &self,
        canvas: &mut Canvas,
        width: i32,
        height: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.rectangle(width, height), path, options)
    }

    pub fn draw_box(
        &self,
        canvas: &mut Canvas,
        width: i32,
        height: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.filled_box(width, height), path, options)
    }

    pub fn draw_rounded_rectangle(
        &self,
        canvas: &mut Canvas,
        width: i32,
        height: i32,
        radius: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(
            canvas,
            self.rounded_rectangle(width, height, radius),
            path,
            options,
        )
    }

    pub fn draw_rounded_box(
        &self,
        canvas: &mut Canvas,
        width: i32,
        height: i32,
        radius: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.rounded_box(width, height, radius), path, options)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &self,
        canvas: &mut Canvas,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        path: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        self.draw(canvas, self.triangle(x1, y1, x2, y2), path, options)
    }
}
