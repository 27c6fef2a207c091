//! Run configuration.
//!
//! Everything a run needs is carried in a [`RunConfig`]: it is read from an
//! optional JSON file, patched by command-line flags, then split into the
//! loader and renderer settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{parse_color, MarkerColors};
use crate::data::loader::LoaderConfig;
use crate::data::model::Axis;
use crate::error::{PointLightError, Result};
use crate::render::assembly::DEFAULT_FRAME_RATE;
use crate::render::plot::Canvas;
use crate::render::{RenderConfig, RoundingPolicy};

/// Complete configuration of a point-light run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Marker table to read. Required.
    pub source_path: Option<PathBuf>,
    /// Columns per marker in the source (2 or 3).
    pub coordinate_stride: usize,
    /// Remove the Y column of every marker while loading.
    pub drop_y_axis: bool,
    /// Axes drawn horizontally and vertically.
    pub axis_selection: [Axis; 2],
    /// Render only the first `k` frames.
    pub frame_limit: Option<usize>,
    /// Raw column index from which columns are padding. Never guessed.
    pub padding_column_threshold: Option<usize>,
    /// Non-marker columns at the start of each row.
    pub leading_columns: usize,
    /// Field delimiter, a single ASCII character.
    pub delimiter: char,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub marker_radius: u32,
    pub background: String,
    pub marker_color: String,
    /// Give each marker its own hue instead of `marker_color`.
    pub color_per_marker: bool,
    pub rounding: RoundingPolicy,
    /// Playback rate suggested for the external video assembly.
    pub frame_rate: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            coordinate_stride: 3,
            drop_y_axis: false,
            axis_selection: [Axis::X, Axis::Z],
            frame_limit: None,
            padding_column_threshold: None,
            leading_columns: 0,
            delimiter: ',',
            output_dir: PathBuf::from("."),
            width: 640,
            height: 480,
            marker_radius: 3,
            background: "black".to_string(),
            marker_color: "white".to_string(),
            color_per_marker: false,
            rounding: RoundingPolicy::Truncate,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl RunConfig {
    /// Read a configuration file; missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PointLightError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn source_path(&self) -> Result<&Path> {
        self.source_path
            .as_deref()
            .ok_or_else(|| PointLightError::config("source_path is required"))
    }

    pub fn loader_config(&self) -> Result<LoaderConfig> {
        if !self.delimiter.is_ascii() {
            return Err(PointLightError::config(format!(
                "delimiter '{}' is not a single ASCII character",
                self.delimiter
            )));
        }
        Ok(LoaderConfig {
            coordinate_stride: self.coordinate_stride,
            drop_y_axis: self.drop_y_axis,
            padding_column_threshold: self.padding_column_threshold,
            leading_columns: self.leading_columns,
            delimiter: self.delimiter as u8,
        })
    }

    /// Renderer settings for a table with `markers` markers.
    pub fn render_config(&self, markers: usize) -> Result<RenderConfig> {
        if self.width == 0 || self.height == 0 {
            return Err(PointLightError::config(format!(
                "canvas size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        let background = parse_color(&self.background)?;
        let colors = if self.color_per_marker {
            MarkerColors::per_marker(background, markers)
        } else {
            MarkerColors::uniform(background, parse_color(&self.marker_color)?)
        };
        Ok(RenderConfig {
            output_dir: self.output_dir.clone(),
            frame_limit: self.frame_limit,
            canvas: Canvas {
                width: self.width,
                height: self.height,
                marker_radius: self.marker_radius,
                colors,
                ..Canvas::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{ "source_path": "walk.csv", "axis_selection": ["x", "y"], "rounding": "exact" }"#,
        )
        .unwrap();
        assert_eq!(cfg.source_path().unwrap(), Path::new("walk.csv"));
        assert_eq!(cfg.axis_selection, [Axis::X, Axis::Y]);
        assert_eq!(cfg.rounding, RoundingPolicy::Exact);
        assert_eq!(cfg.coordinate_stride, 3);
        assert_eq!(cfg.frame_rate, 30);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<RunConfig>(r#"{ "stride": 3 }"#).is_err());
    }

    #[test]
    fn missing_source_is_a_config_error() {
        let err = RunConfig::default().source_path().unwrap_err();
        assert!(matches!(err, PointLightError::Config { .. }));
    }

    #[test]
    fn loader_settings_are_carried_over() {
        let cfg = RunConfig {
            drop_y_axis: true,
            padding_column_threshold: Some(119),
            leading_columns: 1,
            delimiter: '\t',
            ..Default::default()
        };
        let loader = cfg.loader_config().unwrap();
        assert!(loader.drop_y_axis);
        assert_eq!(loader.padding_column_threshold, Some(119));
        assert_eq!(loader.leading_columns, 1);
        assert_eq!(loader.delimiter, b'\t');
    }

    #[test]
    fn render_settings_parse_colours() {
        let cfg = RunConfig {
            background: "#102030".to_string(),
            ..Default::default()
        };
        let render = cfg.render_config(2).unwrap();
        assert_eq!(render.canvas.colors.background, Rgb([0x10, 0x20, 0x30]));

        let bad = RunConfig {
            marker_color: "sparkly".to_string(),
            ..Default::default()
        };
        assert!(bad.render_config(2).is_err());
    }
}
