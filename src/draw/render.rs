//! Cairo-based rasterization of primitives.
//!
//! Outline strokes are drawn inset: a circle of radius `r` with thickness `t`
//! is the annulus between `r - t` and `r`, a rectangle outline is the frame
//! between its box and the box inset by `t`. Nothing is ever erased by
//! painting the background color over it.

use super::color::Color;
use super::shape::{Primitive, RotationMode, Shape, pixel_center};
use crate::util::{self, Rect};
use std::f64::consts::PI;

/// Fills the whole target surface with `color`, replacing whatever was there.
pub fn render_background(ctx: &cairo::Context, color: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    color.apply(ctx);
    let painted = ctx.paint();
    ctx.restore()?;
    painted
}

/// Renders a single primitive to a Cairo context.
///
/// Under [`RotationMode::Canvas`] the primitive's angle is applied about its
/// pivot; under [`RotationMode::Snapshot`] it is drawn unrotated.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `primitive` - Shape plus color, thickness and angle
/// * `mode` - Which stage applies the rotation
pub fn render_primitive(
    ctx: &cairo::Context,
    primitive: &Primitive,
    mode: RotationMode,
) -> Result<(), cairo::Error> {
    ctx.save()?;

    let angle = primitive.draw_angle(mode);
    if !util::is_identity_rotation(angle) {
        let (px, py) = primitive.shape.pivot();
        ctx.translate(px, py);
        ctx.rotate((angle as f64).to_radians());
        ctx.translate(-px, -py);
    }

    ctx.set_antialias(cairo::Antialias::Best);
    primitive.color.apply(ctx);
    let thick = primitive.thickness.max(1) as f64;

    let drawn = render_shape(ctx, &primitive.shape, thick);
    ctx.restore()?;
    drawn
}

/// Dispatches to the per-shape rendering function.
fn render_shape(ctx: &cairo::Context, shape: &Shape, thick: f64) -> Result<(), cairo::Error> {
    match *shape {
        Shape::Circle { cx, cy, radius } => {
            render_ellipse_outline(ctx, cx, cy, radius, radius, thick)
        }
        Shape::FilledCircle { cx, cy, radius } => {
            render_ellipse_filled(ctx, cx, cy, radius, radius)
        }
        Shape::Ellipse { cx, cy, rx, ry } => render_ellipse_outline(ctx, cx, cy, rx, ry, thick),
        Shape::FilledEllipse { cx, cy, rx, ry } => render_ellipse_filled(ctx, cx, cy, rx, ry),
        Shape::Segment { x0, y0, x1, y1 } => render_segment(ctx, x0, y0, x1, y1, thick),
        Shape::Rectangle {
            x,
            y,
            width,
            height,
        } => render_rect_outline(ctx, x, y, width, height, thick),
        Shape::Box {
            x,
            y,
            width,
            height,
        } => {
            let (x, y, w, h) = normalize_box(x, y, width, height);
            ctx.rectangle(x, y, w, h);
            ctx.fill()
        }
        Shape::RoundedRectangle {
            x,
            y,
            width,
            height,
            radius,
        } => render_rounded_outline(ctx, x, y, width, height, radius, thick),
        Shape::RoundedBox {
            x,
            y,
            width,
            height,
            radius,
        } => {
            let (x, y, w, h) = normalize_box(x, y, width, height);
            rounded_rect_path(ctx, x, y, w, h, radius as f64);
            ctx.fill()
        }
        Shape::Triangle {
            x0,
            y0,
            x1,
            y1,
            x2,
            y2,
        } => render_triangle(ctx, [(x0, y0), (x1, y1), (x2, y2)], thick),
    }
}

/// Adds an axis-aligned ellipse to the current path.
///
/// Uses Cairo's arc with scaling; the scale is undone before returning so a
/// following stroke keeps a uniform line width.
fn ellipse_path(
    ctx: &cairo::Context,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.new_sub_path();
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    ctx.restore()
}

/// Ring between the outer edge of the `rx` x `ry` ellipse and the same edge
/// moved inwards by `thick`. Degenerates to a solid ellipse when the ring
/// would close up.
fn render_ellipse_outline(
    ctx: &cairo::Context,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    thick: f64,
) -> Result<(), cairo::Error> {
    if rx < 0 || ry < 0 {
        return Ok(());
    }

    let (px, py) = pixel_center(cx, cy);
    let outer_x = rx as f64 + 0.5;
    let outer_y = ry as f64 + 0.5;

    if thick >= outer_x.min(outer_y) {
        ellipse_path(ctx, px, py, outer_x, outer_y)?;
        return ctx.fill();
    }

    let half = thick / 2.0;
    ellipse_path(ctx, px, py, outer_x - half, outer_y - half)?;
    ctx.set_line_width(thick);
    ctx.stroke()
}

fn render_ellipse_filled(
    ctx: &cairo::Context,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
) -> Result<(), cairo::Error> {
    if rx < 0 || ry < 0 {
        return Ok(());
    }

    let (px, py) = pixel_center(cx, cy);
    ellipse_path(ctx, px, py, rx as f64 + 0.5, ry as f64 + 0.5)?;
    ctx.fill()
}

/// Render a straight line through the centers of its end pixels.
fn render_segment(
    ctx: &cairo::Context,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    thick: f64,
) -> Result<(), cairo::Error> {
    let (ax, ay) = pixel_center(x0, y0);
    let (bx, by) = pixel_center(x1, y1);

    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.move_to(ax, ay);
    ctx.line_to(bx, by);
    ctx.stroke()
}

/// Normalizes a box so width and height are non-negative, matching the
/// capture region of the same box.
fn normalize_box(x: i32, y: i32, w: i32, h: i32) -> (f64, f64, f64, f64) {
    let rect = Rect::normalized(x, y, w, h);
    (
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    )
}

/// Render a rectangle outline as an inset frame (even-odd fill of the outer
/// box and the box shrunk by `thick` on every side).
fn render_rect_outline(
    ctx: &cairo::Context,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    thick: f64,
) -> Result<(), cairo::Error> {
    let (x, y, w, h) = normalize_box(x, y, w, h);

    ctx.set_fill_rule(cairo::FillRule::EvenOdd);
    ctx.rectangle(x, y, w, h);

    let inner_w = w - 2.0 * thick;
    let inner_h = h - 2.0 * thick;
    if inner_w > 0.0 && inner_h > 0.0 {
        ctx.rectangle(x + thick, y + thick, inner_w, inner_h);
    }

    ctx.fill()
}

/// Adds a rounded rectangle to the current path. The corner radius is
/// capped at half the shorter side.
fn rounded_rect_path(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, radius: f64) {
    let r = radius.clamp(0.0, w.min(h) / 2.0);

    ctx.new_sub_path();
    ctx.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    ctx.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    ctx.arc(x + r, y + h - r, r, PI / 2.0, PI);
    ctx.arc(x + r, y + r, r, PI, 1.5 * PI);
    ctx.close_path();
}

/// Render a rounded rectangle outline, stroked along a path inset by half
/// the thickness so the stroke stays inside the box.
fn render_rounded_outline(
    ctx: &cairo::Context,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    radius: i32,
    thick: f64,
) -> Result<(), cairo::Error> {
    let (x, y, w, h) = normalize_box(x, y, w, h);

    if 2.0 * thick >= w.min(h) {
        rounded_rect_path(ctx, x, y, w, h, radius as f64);
        return ctx.fill();
    }

    let half = thick / 2.0;
    rounded_rect_path(
        ctx,
        x + half,
        y + half,
        w - thick,
        h - thick,
        (radius as f64 - half).max(0.0),
    );
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.stroke()
}

/// Render a closed triangle outline through the centers of its vertex pixels.
fn render_triangle(
    ctx: &cairo::Context,
    vertices: [(i32, i32); 3],
    thick: f64,
) -> Result<(), cairo::Error> {
    let [a, b, c] = vertices.map(|(x, y)| pixel_center(x, y));

    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.move_to(a.0, a.1);
    ctx.line_to(b.0, b.1);
    ctx.line_to(c.0, c.1);
    ctx.close_path();
    ctx.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED, WHITE};

    fn surface_with_context(width: i32, height: i32) -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    /// Alpha byte of the pixel at (x, y) for an ARGB32 surface.
    fn alpha_at(surface: &cairo::ImageSurface, x: i32, y: i32) -> u8 {
        let stride = surface.stride() as usize;
        let mut alpha = 0;
        surface
            .with_data(|data| {
                let offset = y as usize * stride + x as usize * 4;
                let px = u32::from_ne_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]);
                alpha = (px >> 24) as u8;
            })
            .unwrap();
        alpha
    }

    #[test]
    fn thick_circle_leaves_center_untouched() {
        let (surface, ctx) = surface_with_context(64, 64);
        let primitive = Primitive::new(
            Shape::Circle {
                cx: 32,
                cy: 32,
                radius: 20,
            },
            RED,
            4,
        );
        render_primitive(&ctx, &primitive, RotationMode::Canvas).unwrap();
        drop(ctx);
        surface.flush();

        assert_eq!(alpha_at(&surface, 32, 32), 0);
        assert_eq!(alpha_at(&surface, 32 + 18, 32), 255);
        assert_eq!(alpha_at(&surface, 32 + 23, 32), 0);
    }

    #[test]
    fn filled_circle_covers_center() {
        let (surface, ctx) = surface_with_context(32, 32);
        let primitive = Primitive::new(
            Shape::FilledCircle {
                cx: 16,
                cy: 16,
                radius: 6,
            },
            BLUE,
            1,
        );
        render_primitive(&ctx, &primitive, RotationMode::Canvas).unwrap();
        drop(ctx);
        surface.flush();

        assert_eq!(alpha_at(&surface, 16, 16), 255);
        assert_eq!(alpha_at(&surface, 0, 0), 0);
    }

    #[test]
    fn rectangle_outline_is_inset_frame() {
        let (surface, ctx) = surface_with_context(40, 40);
        let primitive = Primitive::new(
            Shape::Rectangle {
                x: 5,
                y: 5,
                width: 20,
                height: 10,
            },
            RED,
            2,
        );
        render_primitive(&ctx, &primitive, RotationMode::Canvas).unwrap();
        drop(ctx);
        surface.flush();

        assert_eq!(alpha_at(&surface, 5, 5), 255);
        assert_eq!(alpha_at(&surface, 6, 10), 255);
        assert_eq!(alpha_at(&surface, 15, 10), 0);
        assert_eq!(alpha_at(&surface, 25, 5), 0);
    }

    #[test]
    fn canvas_rotation_moves_box_about_corner() {
        let (surface, ctx) = surface_with_context(64, 64);
        let primitive = Primitive::new(
            Shape::Box {
                x: 32,
                y: 32,
                width: 20,
                height: 4,
            },
            RED,
            1,
        )
        .with_angle(90);
        render_primitive(&ctx, &primitive, RotationMode::Canvas).unwrap();
        drop(ctx);
        surface.flush();

        assert_eq!(alpha_at(&surface, 40, 33), 0);
        assert_eq!(alpha_at(&surface, 30, 40), 255);
    }

    #[test]
    fn snapshot_mode_draws_unrotated() {
        let (surface, ctx) = surface_with_context(64, 64);
        let primitive = Primitive::new(
            Shape::Box {
                x: 32,
                y: 32,
                width: 20,
                height: 4,
            },
            RED,
            1,
        )
        .with_angle(90);
        render_primitive(&ctx, &primitive, RotationMode::Snapshot).unwrap();
        drop(ctx);
        surface.flush();

        assert_eq!(alpha_at(&surface, 40, 33), 255);
    }

    #[test]
    fn background_replaces_existing_pixels() {
        let (surface, ctx) = surface_with_context(8, 8);
        let primitive = Primitive::new(
            Shape::Box {
                x: 0,
                y: 0,
                width: 8,
                height: 8,
            },
            RED,
            1,
        );
        render_primitive(&ctx, &primitive, RotationMode::Canvas).unwrap();
        render_background(&ctx, crate::draw::color::TRANSPARENT).unwrap();
        render_background(&ctx, WHITE).unwrap();
        drop(ctx);
        surface.flush();

        let mut all_white = true;
        surface
            .with_data(|data| all_white = data.iter().all(|b| *b == 0xff))
            .unwrap();
        assert!(all_white);
    }
}
