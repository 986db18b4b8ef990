use std::path::PathBuf;

use super::{
    pipeline::{CaptureOptions, capture_and_save, draw_and_capture, save_screenshot},
    types::{CaptureError, OutputFormat},
};
use crate::draw::{BLACK, Canvas, Primitive, RED, RotationMode, Shape, WHITE};
use crate::util::Rect;

fn bmp_dimensions(path: &PathBuf) -> (u32, u32) {
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[0..2], b"BM");
    let width = i32::from_le_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]);
    let height = i32::from_le_bytes([bytes[22], bytes[23], bytes[24], bytes[25]]);
    (width.unsigned_abs(), height.unsigned_abs())
}

fn canvas_is_blank(canvas: &Canvas) -> bool {
    let background = canvas.background();
    canvas
        .snapshot()
        .unwrap()
        .to_rgba()
        .unwrap()
        .chunks_exact(4)
        .all(|px| px == [background.r, background.g, background.b, background.a])
}

#[test]
fn circle_inside_canvas_saves_full_box() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new(800, 800, WHITE).unwrap();
    let primitive = Primitive::new(
        Shape::Circle {
            cx: 400,
            cy: 300,
            radius: 50,
        },
        BLACK,
        1,
    );
    let path = dir.path().join("circle.bmp");

    let result = draw_and_capture(&mut canvas, &primitive, &path, &CaptureOptions::default())
        .unwrap();

    assert_eq!(result.region, Rect::new(350, 250, 101, 101));
    assert_eq!((result.width, result.height), (101, 101));
    assert_eq!(bmp_dimensions(&path), (101, 101));
    assert!(canvas_is_blank(&canvas));
}

#[test]
fn partly_off_canvas_segment_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new(800, 800, WHITE).unwrap();
    let primitive = Primitive::new(
        Shape::Segment {
            x0: 300,
            y0: 300,
            x1: 300,
            y1: 900,
        },
        BLACK,
        1,
    );
    let path = dir.path().join("segment.bmp");

    let result = draw_and_capture(&mut canvas, &primitive, &path, &CaptureOptions::default())
        .unwrap();

    assert_eq!(result.region, Rect::new(299, 299, 2, 501));
    assert_eq!(bmp_dimensions(&path), (2, 501));
}

#[test]
fn failed_save_still_clears_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new(100, 100, WHITE).unwrap();
    let primitive = Primitive::new(
        Shape::Box {
            x: 10,
            y: 10,
            width: 20,
            height: 20,
        },
        RED,
        1,
    );
    let path = dir.path().join("no_such_dir").join("box.bmp");

    let err = draw_and_capture(&mut canvas, &primitive, &path, &CaptureOptions::default())
        .unwrap_err();

    assert!(matches!(err, CaptureError::FileWrite { .. }));
    assert!(canvas_is_blank(&canvas));
}

#[test]
fn fully_off_canvas_primitive_reports_off_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new(100, 100, WHITE).unwrap();
    let primitive = Primitive::new(
        Shape::FilledCircle {
            cx: 500,
            cy: 500,
            radius: 10,
        },
        RED,
        1,
    );
    let path = dir.path().join("gone.bmp");

    let err = draw_and_capture(&mut canvas, &primitive, &path, &CaptureOptions::default())
        .unwrap_err();

    assert!(matches!(err, CaptureError::OffCanvas(_)));
    assert!(!path.exists());
}

#[test]
fn snapshot_rotation_rotates_saved_tile_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new(200, 200, WHITE).unwrap();
    let primitive = Primitive::new(
        Shape::Box {
            x: 20,
            y: 20,
            width: 60,
            height: 20,
        },
        RED,
        1,
    )
    .with_angle(90);
    let path = dir.path().join("rotated.bmp");
    let options = CaptureOptions {
        rotation: RotationMode::Snapshot,
        format: OutputFormat::Bmp,
    };

    let result = draw_and_capture(&mut canvas, &primitive, &path, &options).unwrap();

    assert_eq!(result.region, Rect::new(20, 20, 60, 20));
    assert_eq!((result.width, result.height), (20, 60));
    assert_eq!(bmp_dimensions(&path), (20, 60));
}

#[test]
fn canvas_rotation_captures_rotated_hull() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new(200, 200, WHITE).unwrap();
    let primitive = Primitive::new(
        Shape::Box {
            x: 100,
            y: 20,
            width: 60,
            height: 20,
        },
        RED,
        1,
    )
    .with_angle(90);
    let path = dir.path().join("rotated.bmp");

    let result =
        draw_and_capture(&mut canvas, &primitive, &path, &CaptureOptions::default()).unwrap();

    assert_eq!(result.region, Rect::new(80, 20, 20, 60));
    assert_eq!((result.width, result.height), (20, 60));
}

#[test]
fn capture_and_save_leaves_canvas_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new(50, 50, WHITE).unwrap();
    let primitive = Primitive::new(
        Shape::Box {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        },
        RED,
        1,
    );
    canvas.draw(&primitive, RotationMode::Canvas).unwrap();

    let path = dir.path().join("region.png");
    let result = capture_and_save(
        &canvas,
        Rect::new(-5, -5, 20, 20),
        0,
        &path,
        OutputFormat::Png,
    )
    .unwrap();

    assert_eq!(result.region, Rect::new(0, 0, 15, 15));
    assert!(!canvas_is_blank(&canvas));
}

#[test]
fn screenshot_covers_whole_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = Canvas::new(64, 48, WHITE).unwrap();
    let path = dir.path().join("screenshot.bmp");

    let result = save_screenshot(&canvas, &path, OutputFormat::Bmp).unwrap();

    assert_eq!(result.region, Rect::new(0, 0, 64, 48));
    assert_eq!(bmp_dimensions(&path), (64, 48));
}
