use std::fs;
use std::path::{Path, PathBuf};

use image::Rgb;
use pointlight::data::loader::{load, LoaderConfig};
use pointlight::data::model::{Axis, AxisSelection};
use pointlight::render::plot::{draw_scatter, Canvas};
use pointlight::render::{compute_bounds, render, Bounds, RenderConfig, RoundingPolicy};
use pointlight::{run, PointLightError, RunConfig};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Ten frames of two markers: marker 0 at (r, _, 0), marker 1 at (20 + r, _, 30).
/// The Y columns hold large values that must never influence the bounds.
fn walking_pair() -> String {
    (0..10)
        .map(|r| format!("{r},500,0,{},-500,30", 20 + r))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_source(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn numbered_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort_by_key(|n| n.trim_end_matches(".png").parse::<usize>().unwrap());
    names
}

fn white_pixels(path: &Path) -> usize {
    let img = image::open(path).unwrap().to_rgb8();
    img.pixels().filter(|p| **p == WHITE).count()
}

#[test]
fn ten_frames_of_two_markers_render_with_fixed_bounds() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = write_source(src.path(), "pair.csv", &walking_pair());

    let table = load(&source, &LoaderConfig::default()).unwrap();
    assert_eq!((table.len(), table.columns(), table.marker_count()), (10, 6, 2));

    let selection = AxisSelection::resolve(Axis::X, Axis::Z, table.layout()).unwrap();
    let bounds = compute_bounds(&table, selection, RoundingPolicy::Truncate);
    assert_eq!(
        bounds,
        Bounds {
            min_x: 0.0,
            max_x: 29.0,
            min_y: 0.0,
            max_y: 30.0
        }
    );

    let config = RenderConfig {
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    };
    let written = render(&table, &bounds, selection, &config).unwrap();
    assert_eq!(written.len(), 10);
    let expected: Vec<String> = (1..=10).map(|n| format!("{n}.png")).collect();
    assert_eq!(numbered_files(out.path()), expected);

    // Every frame holds exactly two whole dots.
    let canvas = Canvas::default();
    let one_dot = draw_scatter(&[15.0], &[15.0], &bounds, &canvas)
        .pixels()
        .filter(|p| **p == WHITE)
        .count();
    for path in &written {
        assert_eq!(white_pixels(path), 2 * one_dot, "{}", path.display());
    }

    // Marker 1 of frame 0 sits at (20, 30): top edge of the plot area.
    let first = image::open(&written[0]).unwrap().to_rgb8();
    let px = (10.0 + 20.0 / 29.0 * 620.0_f64).round() as u32;
    assert_eq!(*first.get_pixel(px, 10), WHITE);
}

#[test]
fn frame_limit_writes_a_prefix() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = write_source(src.path(), "pair.csv", &walking_pair());

    let config = RunConfig {
        source_path: Some(source),
        frame_limit: Some(4),
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    };
    let summary = run(&config).unwrap();
    assert_eq!(summary.frames.len(), 4);
    assert_eq!(
        numbered_files(out.path()),
        vec!["1.png", "2.png", "3.png", "4.png"]
    );
}

#[test]
fn frame_limit_beyond_table_is_rejected() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = write_source(src.path(), "pair.csv", &walking_pair());

    let config = RunConfig {
        source_path: Some(source),
        frame_limit: Some(11),
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    };
    assert!(matches!(run(&config), Err(PointLightError::Config { .. })));
    assert!(numbered_files(out.path()).is_empty());
}

#[test]
fn single_marker_renders_single_dot_frames() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = write_source(src.path(), "one.csv", "1,0,1\n2,0,3\n3,0,2\n");

    let config = RunConfig {
        source_path: Some(source),
        output_dir: out.path().to_path_buf(),
        rounding: RoundingPolicy::Exact,
        ..Default::default()
    };
    let summary = run(&config).unwrap();
    assert_eq!(summary.frames.len(), 3);
    let counts: Vec<usize> = summary.frames.iter().map(|p| white_pixels(p)).collect();
    assert!(counts[0] > 0);
    assert!(counts.iter().all(|c| *c == counts[0]));
}

#[test]
fn empty_table_writes_nothing() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = write_source(src.path(), "empty.csv", "");

    let config = RunConfig {
        source_path: Some(source),
        output_dir: out.path().join("frames"),
        ..Default::default()
    };
    let summary = run(&config).unwrap();
    assert!(summary.frames.is_empty());
    assert!(!out.path().join("frames").exists());
}

#[test]
fn ragged_row_fails_before_any_output() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut lines: Vec<String> = walking_pair().lines().map(String::from).collect();
    lines[5] = "5,500,0,25,-500".to_string();
    let source = write_source(src.path(), "ragged.csv", &lines.join("\n"));

    let config = RunConfig {
        source_path: Some(source),
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    };
    match run(&config) {
        Err(PointLightError::MalformedTable { row, .. }) => assert_eq!(row, Some(5)),
        other => panic!("expected malformed table, got {other:?}"),
    }
    assert!(numbered_files(out.path()).is_empty());
}

#[test]
fn loading_is_repeatable_and_drops_padding() {
    let src = tempfile::tempdir().unwrap();
    let text = (0..5)
        .map(|r| format!("{r},{r}.5,1,2,3,4,5,,,"))
        .collect::<Vec<_>>()
        .join("\n");
    let source = write_source(src.path(), "padded.csv", &text);

    let config = LoaderConfig {
        padding_column_threshold: Some(7),
        leading_columns: 1,
        ..Default::default()
    };
    let a = load(&source, &config).unwrap();
    let b = load(&source, &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.columns(), 6);
    assert_eq!(a.row(3).unwrap(), &[3.5, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn exact_bounds_contain_every_rendered_value() {
    let src = tempfile::tempdir().unwrap();
    let text = "0.25,9,-3.75,1.5,9,2.125\n-1.125,9,0.5,4.875,9,-0.25\n";
    let source = write_source(src.path(), "frac.csv", text);

    let table = load(&source, &LoaderConfig::default()).unwrap();
    let selection = AxisSelection::resolve(Axis::X, Axis::Z, table.layout()).unwrap();
    for rounding in [RoundingPolicy::Exact, RoundingPolicy::Outward] {
        let bounds = compute_bounds(&table, selection, rounding);
        assert!(bounds.min_x <= bounds.max_x && bounds.min_y <= bounds.max_y);
        for row in table.rows() {
            for marker in row.chunks(3) {
                assert!(bounds.contains(marker[0], marker[2]), "{rounding:?}");
            }
        }
    }
}

#[test]
fn missing_source_is_reported() {
    let config = RunConfig {
        source_path: Some(PathBuf::from("/definitely/not/here.csv")),
        ..Default::default()
    };
    assert!(matches!(run(&config), Err(PointLightError::MissingFile { .. })));
}
