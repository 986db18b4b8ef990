use super::*;
use crate::capture::OutputFormat;
use crate::config::Config;
use crate::draw::{BLACK, Shape, WHITE};

fn circle(cx: i32, cy: i32, radius: i32) -> Primitive {
    Primitive::new(Shape::Circle { cx, cy, radius }, BLACK, 1)
}

fn session_in(dir: &std::path::Path, mode: CaptureMode) -> Session {
    let mut options = SessionOptions::new(dir.to_path_buf());
    options.mode = mode;
    Session::new(Canvas::new(200, 200, WHITE).unwrap(), options).unwrap()
}

#[test]
fn per_shape_files_are_numbered_sequentially() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path(), CaptureMode::PerShape);

    let first = session.draw((50, 50), &circle(50, 50, 10)).unwrap();
    let second = session.draw((100, 100), &circle(100, 100, 10)).unwrap();

    assert_eq!(first, Some(dir.path().join("drawing_1.bmp")));
    assert_eq!(second, Some(dir.path().join("drawing_2.bmp")));
    assert!(dir.path().join("drawing_1.bmp").exists());
    assert!(dir.path().join("drawing_2.bmp").exists());
}

#[test]
fn failed_capture_does_not_consume_a_number() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path(), CaptureMode::PerShape);

    session.draw((10, 10), &circle(10, 10, 5)).unwrap();
    let err = session.draw((0, 0), &circle(1000, 1000, 5)).unwrap_err();
    assert!(matches!(err, CaptureError::OffCanvas(_)));
    assert_eq!(session.next_index(), 2);

    let next = session.draw((20, 20), &circle(20, 20, 5)).unwrap();
    assert_eq!(next, Some(dir.path().join("drawing_2.bmp")));

    let summary = session.finish().unwrap();
    assert_eq!(summary.drawn, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.saved.len(), 2);
}

#[test]
fn position_log_has_one_line_per_primitive() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path(), CaptureMode::PerShape);

    session.draw((10, 20), &circle(10, 20, 3)).unwrap();
    let _ = session.draw((-500, -500), &circle(-500, -500, 3));
    session.draw((30, 40), &circle(30, 40, 3)).unwrap();

    let summary = session.finish().unwrap();
    let log_path = summary.positions.unwrap();
    let contents = std::fs::read_to_string(log_path).unwrap();
    assert_eq!(contents, "10,20\n-500,-500\n30,40\n");
}

#[test]
fn disabled_position_log_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = SessionOptions::new(dir.path().to_path_buf());
    options.positions_file = None;
    let mut session = Session::new(Canvas::new(50, 50, WHITE).unwrap(), options).unwrap();

    session.draw((10, 10), &circle(10, 10, 3)).unwrap();
    let summary = session.finish().unwrap();

    assert!(summary.positions.is_none());
    assert!(!dir.path().join("drawing_positions.txt").exists());
}

#[test]
fn screenshot_mode_writes_single_image() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path(), CaptureMode::Screenshot);

    assert_eq!(session.draw((50, 50), &circle(50, 50, 10)).unwrap(), None);
    assert_eq!(session.draw((90, 90), &circle(90, 90, 10)).unwrap(), None);

    let summary = session.finish().unwrap();
    assert_eq!(summary.screenshot, Some(dir.path().join("screenshot.bmp")));
    assert!(summary.saved.is_empty());
    assert!(dir.path().join("screenshot.bmp").exists());
    assert!(!dir.path().join("drawing_1.bmp").exists());
}

#[test]
fn session_creates_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let _session = session_in(&nested, CaptureMode::PerShape);
    assert!(nested.is_dir());
}

#[test]
fn options_follow_config() {
    let config = Config::from_toml(
        r#"
        [output]
        directory = "/tmp/sketchcap-test"
        file_prefix = "shape-"
        first_index = 7
        format = "png"
        write_positions = false
        "#,
    )
    .unwrap();

    let options = options_from_config(&config.output, &config.capture).unwrap();
    assert_eq!(options.output_dir, PathBuf::from("/tmp/sketchcap-test"));
    assert_eq!(options.file_prefix, "shape-");
    assert_eq!(options.first_index, 7);
    assert_eq!(options.format(), OutputFormat::Png);
    assert!(options.positions_path().is_none());
    assert_eq!(
        options.screenshot_path(),
        PathBuf::from("/tmp/sketchcap-test/screenshot.png")
    );
}

#[test]
fn empty_output_directory_is_rejected() {
    let config = Config::from_toml("[output]\ndirectory = \"\"").unwrap();
    assert!(options_from_config(&config.output, &config.capture).is_err());
}
