//! Captured pixel tiles: readback target, rotation and encoding.

use super::types::{CaptureError, OutputFormat};
use crate::util::{self, Rect};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// A rectangle of pixels copied off the canvas.
///
/// Backed by its own ARGB32 Cairo surface, released when the tile is dropped.
pub struct Tile {
    surface: cairo::ImageSurface,
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tile")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Tile {
    /// Allocates a transparent tile of exactly `width` x `height` pixels.
    pub fn allocate(width: i32, height: i32) -> Result<Self, CaptureError> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .map_err(|source| CaptureError::SurfaceAllocation {
                width,
                height,
                source,
            })?;
        Ok(Self { surface })
    }

    /// Copies `region` of `source` into a freshly allocated tile.
    ///
    /// `region` must already be clamped to the source surface.
    pub fn read_from(source: &cairo::ImageSurface, region: Rect) -> Result<Self, CaptureError> {
        let tile = Self::allocate(region.width, region.height)?;
        let readback = |err: cairo::Error| {
            CaptureError::PixelReadback(format!("region {:?}: {}", region, err))
        };

        let ctx = cairo::Context::new(&tile.surface).map_err(readback)?;
        ctx.set_source_surface(source, -region.x as f64, -region.y as f64)
            .map_err(readback)?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.paint().map_err(readback)?;
        drop(ctx);

        tile.surface.flush();
        Ok(tile)
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Returns the tile rotated by `degrees` (clockwise in screen space).
    ///
    /// The result is sized to the hull of the rotated tile and resampled
    /// bilinearly; uncovered corners are transparent. A whole number of turns
    /// returns the tile untouched.
    pub fn rotate(self, degrees: i32) -> Result<Self, CaptureError> {
        if util::is_identity_rotation(degrees) {
            return Ok(self);
        }

        let rotation = |source: cairo::Error| CaptureError::Rotation { degrees, source };

        let width = self.width() as f64;
        let height = self.height() as f64;
        let hull = Rect::new(0, 0, self.width(), self.height())
            .rotated_hull((width / 2.0, height / 2.0), degrees);

        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, hull.width, hull.height)
                .map_err(rotation)?;

        let ctx = cairo::Context::new(&surface).map_err(rotation)?;
        ctx.translate(hull.width as f64 / 2.0, hull.height as f64 / 2.0);
        ctx.rotate((degrees as f64).to_radians());
        ctx.translate(-width / 2.0, -height / 2.0);
        ctx.set_source_surface(&self.surface, 0.0, 0.0)
            .map_err(rotation)?;
        ctx.source().set_filter(cairo::Filter::Bilinear);
        ctx.paint().map_err(rotation)?;
        drop(ctx);

        surface.flush();
        Ok(Self { surface })
    }

    /// Returns the pixels as straight (non-premultiplied) RGBA rows.
    pub fn to_rgba(&self) -> Result<Vec<u8>, CaptureError> {
        let width = self.width().max(0) as usize;
        let height = self.height().max(0) as usize;
        let stride = self.surface.stride() as usize;
        let mut pixels = Vec::with_capacity(width * height * 4);

        self.surface
            .with_data(|data| {
                for row in data.chunks(stride).take(height) {
                    for px in row[..width * 4].chunks_exact(4) {
                        let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                        pixels.extend_from_slice(&unpremultiply(argb));
                    }
                }
            })
            .map_err(|err| CaptureError::PixelReadback(err.to_string()))?;

        Ok(pixels)
    }

    /// Encodes the tile to `path`.
    pub fn write(&self, path: &Path, format: OutputFormat) -> Result<(), CaptureError> {
        match format {
            OutputFormat::Bmp => self.write_bmp(path),
            OutputFormat::Png => self.write_png(path),
        }
    }

    fn write_bmp(&self, path: &Path) -> Result<(), CaptureError> {
        let pixels = self.to_rgba()?;
        let image = image::RgbaImage::from_raw(self.width() as u32, self.height() as u32, pixels)
            .ok_or_else(|| {
                CaptureError::file_write(path, io::Error::other("pixel buffer size mismatch"))
            })?;

        image
            .save_with_format(path, image::ImageFormat::Bmp)
            .map_err(|err| {
                let source = match err {
                    image::ImageError::IoError(io_err) => io_err,
                    other => io::Error::other(other),
                };
                CaptureError::file_write(path, source)
            })
    }

    fn write_png(&self, path: &Path) -> Result<(), CaptureError> {
        let file = File::create(path).map_err(|err| CaptureError::file_write(path, err))?;
        let mut writer = BufWriter::new(file);
        self.surface.write_to_png(&mut writer).map_err(|err| {
            let source = match err {
                cairo::IoError::Io(io_err) => io_err,
                other => io::Error::other(other.to_string()),
            };
            CaptureError::file_write(path, source)
        })
    }
}

/// Converts one native-endian premultiplied ARGB32 pixel to straight RGBA.
fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = (argb >> 24) & 0xff;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let channel = |shift: u32| {
        let c = (argb >> shift) & 0xff;
        ((c * 255 + a / 2) / a).min(255) as u8
    };
    [channel(16), channel(8), channel(0), a as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_surface(width: i32, height: i32, rgba: (f64, f64, f64, f64)) -> cairo::ImageSurface {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgba(rgba.0, rgba.1, rgba.2, rgba.3);
        ctx.paint().unwrap();
        drop(ctx);
        surface.flush();
        surface
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        assert_eq!(unpremultiply(0xff_ff_00_00), [255, 0, 0, 255]);
        assert_eq!(unpremultiply(0x80_40_00_00), [128, 0, 0, 128]);
        assert_eq!(unpremultiply(0x00_00_00_00), [0, 0, 0, 0]);
    }

    #[test]
    fn read_from_copies_exact_region() {
        let source = solid_surface(50, 40, (0.0, 0.0, 1.0, 1.0));
        let tile = Tile::read_from(&source, Rect::new(10, 5, 7, 3)).unwrap();
        assert_eq!((tile.width(), tile.height()), (7, 3));

        let pixels = tile.to_rgba().unwrap();
        assert_eq!(pixels.len(), 7 * 3 * 4);
        assert!(pixels.chunks_exact(4).all(|px| px == [0, 0, 255, 255]));
    }

    #[test]
    fn zero_rotation_is_a_no_op() {
        let source = solid_surface(20, 20, (1.0, 1.0, 1.0, 1.0));
        let ctx = cairo::Context::new(&source).unwrap();
        ctx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
        ctx.rectangle(2.0, 3.0, 5.0, 1.0);
        ctx.fill().unwrap();
        drop(ctx);

        let tile = Tile::read_from(&source, Rect::new(0, 0, 12, 8)).unwrap();
        let before = tile.to_rgba().unwrap();
        let rotated = tile.rotate(0).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (12, 8));
        assert_eq!(rotated.to_rgba().unwrap(), before);

        let turned = rotated.rotate(360).unwrap();
        assert_eq!(turned.to_rgba().unwrap(), before);
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let source = solid_surface(30, 10, (0.0, 1.0, 0.0, 1.0));
        let tile = Tile::read_from(&source, Rect::new(0, 0, 30, 10)).unwrap();
        let rotated = tile.rotate(90).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (10, 30));
    }

    #[test]
    fn diagonal_rotation_grows_tile() {
        let source = solid_surface(10, 10, (0.0, 1.0, 0.0, 1.0));
        let tile = Tile::read_from(&source, Rect::new(0, 0, 10, 10)).unwrap();
        let rotated = tile.rotate(45).unwrap();
        assert!(rotated.width() > 10);
        assert!(rotated.height() > 10);
    }

    #[test]
    fn write_bmp_and_png_produce_decodable_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = solid_surface(16, 16, (1.0, 0.0, 0.0, 1.0));
        let tile = Tile::read_from(&source, Rect::new(4, 4, 6, 5)).unwrap();

        let bmp = dir.path().join("tile.bmp");
        tile.write(&bmp, OutputFormat::Bmp).unwrap();
        let bytes = std::fs::read(&bmp).unwrap();
        assert_eq!(&bytes[0..2], b"BM");

        let png = dir.path().join("tile.png");
        tile.write(&png, OutputFormat::Png).unwrap();
        let bytes = std::fs::read(&png).unwrap();
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn write_into_missing_directory_reports_file_write() {
        let dir = tempfile::tempdir().unwrap();
        let source = solid_surface(4, 4, (1.0, 0.0, 0.0, 1.0));
        let tile = Tile::read_from(&source, Rect::new(0, 0, 4, 4)).unwrap();

        let path = dir.path().join("missing").join("tile.bmp");
        let err = tile.write(&path, OutputFormat::Bmp).unwrap_err();
        assert!(matches!(err, CaptureError::FileWrite { .. }));
    }
}
