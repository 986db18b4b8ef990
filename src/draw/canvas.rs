//! Software canvas primitives are rasterized onto.

use super::color::Color;
use super::render;
use super::shape::{Primitive, RotationMode};
use crate::capture::{CaptureError, Tile};
use crate::util::Rect;

/// Fixed-size ARGB32 drawing surface with a background color.
///
/// The canvas accumulates draw calls until it is cleared. Its dimensions are
/// the bounds every capture region is clamped against.
pub struct Canvas {
    surface: cairo::ImageSurface,
    background: Color,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("background", &self.background)
            .finish()
    }
}

impl Canvas {
    /// Creates a `width` x `height` canvas filled with `background`.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, CaptureError> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .map_err(|source| CaptureError::SurfaceAllocation {
                width,
                height,
                source,
            })?;

        let mut canvas = Self {
            surface,
            background,
        };
        canvas.clear()?;
        Ok(canvas)
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Whole-canvas rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    fn context(&self) -> Result<cairo::Context, CaptureError> {
        cairo::Context::new(&self.surface).map_err(CaptureError::Render)
    }

    /// Rasterizes one primitive.
    pub fn draw(&mut self, primitive: &Primitive, mode: RotationMode) -> Result<(), CaptureError> {
        let ctx = self.context()?;
        render::render_primitive(&ctx, primitive, mode).map_err(CaptureError::Render)
    }

    /// Resets every pixel to the background color.
    pub fn clear(&mut self) -> Result<(), CaptureError> {
        let ctx = self.context()?;
        render::render_background(&ctx, self.background).map_err(CaptureError::Render)
    }

    /// Flushes pending drawing so pixel reads observe it.
    pub fn present(&self) {
        self.surface.flush();
    }

    /// Copies an already-clamped region into a new tile.
    pub fn read_region(&self, region: Rect) -> Result<Tile, CaptureError> {
        if !region.is_valid() {
            return Err(CaptureError::OffCanvas(region));
        }
        self.present();
        Tile::read_from(&self.surface, region)
    }

    /// Copies the whole canvas into a new tile.
    pub fn snapshot(&self) -> Result<Tile, CaptureError> {
        self.read_region(self.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};
    use crate::draw::shape::Shape;

    #[test]
    fn new_canvas_is_filled_with_background() {
        let canvas = Canvas::new(8, 6, WHITE).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (8, 6));

        let pixels = canvas.snapshot().unwrap().to_rgba().unwrap();
        assert!(pixels.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn clear_erases_drawn_primitives() {
        let mut canvas = Canvas::new(20, 20, WHITE).unwrap();
        let primitive = Primitive::new(
            Shape::Box {
                x: 2,
                y: 2,
                width: 10,
                height: 10,
            },
            RED,
            1,
        );
        canvas.draw(&primitive, RotationMode::Canvas).unwrap();
        let drawn = canvas.read_region(Rect::new(5, 5, 1, 1)).unwrap();
        assert_eq!(drawn.to_rgba().unwrap(), vec![255, 0, 0, 255]);

        canvas.clear().unwrap();
        let cleared = canvas.read_region(Rect::new(5, 5, 1, 1)).unwrap();
        assert_eq!(cleared.to_rgba().unwrap(), vec![255, 255, 255, 255]);
    }

    #[test]
    fn empty_region_is_rejected() {
        let canvas = Canvas::new(10, 10, WHITE).unwrap();
        let err = canvas.read_region(Rect::new(10, 0, 0, 5)).unwrap_err();
        assert!(matches!(err, CaptureError::OffCanvas(_)));
    }
}
