use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pointlight::data::model::Axis;
use pointlight::render::RoundingPolicy;
use pointlight::RunConfig;

#[derive(Parser)]
#[command(
    name = "pointlight",
    about = "Render a motion-capture marker table as point-light display frames",
    version
)]
struct Cli {
    /// Marker table (delimited text, no header)
    source: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Columns per marker in the source (2 or 3)
    #[arg(long)]
    stride: Option<usize>,

    /// Drop the Y column of every marker while loading
    #[arg(long)]
    drop_y: bool,

    /// Horizontal and vertical axes, e.g. "x,z"
    #[arg(long, value_delimiter = ',', num_args = 2)]
    axes: Option<Vec<Axis>>,

    /// Render only the first N frames
    #[arg(long)]
    frames: Option<usize>,

    /// Raw column index from which columns are padding
    #[arg(long)]
    padding_threshold: Option<usize>,

    /// Non-marker columns at the start of each row
    #[arg(long)]
    leading_columns: Option<usize>,

    /// Field delimiter, a single ASCII character
    #[arg(long)]
    delimiter: Option<char>,

    /// Output directory for the numbered frames
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Axis limit rounding: truncate, outward or exact
    #[arg(long)]
    rounding: Option<RoundingPolicy>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Dot radius in pixels
    #[arg(long)]
    marker_radius: Option<u32>,

    /// Background colour (name or hex)
    #[arg(long)]
    background: Option<String>,

    /// Marker colour (name or hex)
    #[arg(long)]
    marker_color: Option<String>,

    /// Colour each marker differently
    #[arg(long)]
    color_per_marker: bool,

    /// Frame rate for the suggested ffmpeg command
    #[arg(long)]
    fps: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(source) = self.source {
            cfg.source_path = Some(source);
        }
        if let Some(stride) = self.stride {
            cfg.coordinate_stride = stride;
        }
        if self.drop_y {
            cfg.drop_y_axis = true;
        }
        if let Some(axes) = self.axes {
            if let [h, v] = axes[..] {
                cfg.axis_selection = [h, v];
            }
        }
        if self.frames.is_some() {
            cfg.frame_limit = self.frames;
        }
        if self.padding_threshold.is_some() {
            cfg.padding_column_threshold = self.padding_threshold;
        }
        if let Some(leading) = self.leading_columns {
            cfg.leading_columns = leading;
        }
        if let Some(delimiter) = self.delimiter {
            cfg.delimiter = delimiter;
        }
        if let Some(output) = self.output {
            cfg.output_dir = output;
        }
        if let Some(rounding) = self.rounding {
            cfg.rounding = rounding;
        }
        if let Some(width) = self.width {
            cfg.width = width;
        }
        if let Some(height) = self.height {
            cfg.height = height;
        }
        if let Some(radius) = self.marker_radius {
            cfg.marker_radius = radius;
        }
        if let Some(background) = self.background {
            cfg.background = background;
        }
        if let Some(marker_color) = self.marker_color {
            cfg.marker_color = marker_color;
        }
        if self.color_per_marker {
            cfg.color_per_marker = true;
        }
        if let Some(fps) = self.fps {
            cfg.frame_rate = fps;
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.into_config()?;
    let summary = pointlight::run(&config).context("rendering point-light display")?;

    log::info!(
        "Wrote {} frames to {}",
        summary.frames.len(),
        config.output_dir.display()
    );
    if !summary.frames.is_empty() {
        log::info!("Assemble with: {}", summary.assembly);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(args: &[&str]) -> RunConfig {
        Cli::try_parse_from(args).unwrap().into_config().unwrap()
    }

    #[test]
    fn drawing_and_format_flags_reach_the_config() {
        let cfg = config_from(&[
            "pointlight",
            "walk.tsv",
            "--delimiter",
            ";",
            "--width",
            "800",
            "--height",
            "600",
            "--marker-radius",
            "5",
            "--background",
            "#101010",
            "--marker-color",
            "yellow",
        ]);
        assert_eq!(cfg.source_path.as_deref(), Some(std::path::Path::new("walk.tsv")));
        assert_eq!(cfg.delimiter, ';');
        assert_eq!((cfg.width, cfg.height, cfg.marker_radius), (800, 600, 5));
        assert_eq!(cfg.background, "#101010");
        assert_eq!(cfg.marker_color, "yellow");
    }

    #[test]
    fn selection_and_rendering_flags_reach_the_config() {
        let cfg = config_from(&[
            "pointlight",
            "walk.csv",
            "--stride",
            "3",
            "--drop-y",
            "--axes",
            "x,z",
            "--frames",
            "12",
            "--padding-threshold",
            "119",
            "--leading-columns",
            "1",
            "--rounding",
            "outward",
            "--fps",
            "60",
        ]);
        assert!(cfg.drop_y_axis);
        assert_eq!(cfg.axis_selection, [Axis::X, Axis::Z]);
        assert_eq!(cfg.frame_limit, Some(12));
        assert_eq!(cfg.padding_column_threshold, Some(119));
        assert_eq!(cfg.leading_columns, 1);
        assert_eq!(cfg.rounding, RoundingPolicy::Outward);
        assert_eq!(cfg.frame_rate, 60);
    }

    #[test]
    fn unset_flags_keep_defaults() {
        let cfg = config_from(&["pointlight", "walk.csv"]);
        let defaults = RunConfig::default();
        assert_eq!(cfg.width, defaults.width);
        assert_eq!(cfg.background, defaults.background);
        assert_eq!(cfg.delimiter, defaults.delimiter);
    }
}
