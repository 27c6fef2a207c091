use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::bounds::Bounds;
use super::plot::{draw_scatter, Canvas};
use crate::data::model::{AxisSelection, MarkerTable};
use crate::error::{PointLightError, Result};

/// Image extension of every written frame.
pub const FRAME_EXTENSION: &str = "png";

// ---------------------------------------------------------------------------
// Render configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Directory receiving `1.png`, `2.png`, ...
    pub output_dir: PathBuf,
    /// Render only the first `k` frames. `None` renders the whole table.
    pub frame_limit: Option<usize>,
    pub canvas: Canvas,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            frame_limit: None,
            canvas: Canvas::default(),
        }
    }
}

/// Output path of the frame at zero-based `frame` index. Names start at 1.
pub fn frame_path(output_dir: &Path, frame: usize) -> PathBuf {
    output_dir.join(format!("{}.{FRAME_EXTENSION}", frame + 1))
}

/// Number of frames a run will write.
pub fn frame_count(total: usize, frame_limit: Option<usize>) -> Result<usize> {
    match frame_limit {
        None => Ok(total),
        Some(0) => Err(PointLightError::config("frame limit must be at least 1")),
        Some(k) if k > total => Err(PointLightError::config(format!(
            "frame limit {k} exceeds the {total} frames in the table"
        ))),
        Some(k) => Ok(k),
    }
}

/// Horizontal and vertical values of every marker in one frame.
pub fn frame_coordinates(
    row: &[f64],
    stride: usize,
    selection: AxisSelection,
) -> (Vec<f64>, Vec<f64>) {
    let pick = |offset: usize| -> Vec<f64> {
        row.iter().skip(offset).step_by(stride).copied().collect()
    };
    (pick(selection.horizontal()), pick(selection.vertical()))
}

// ---------------------------------------------------------------------------
// Render loop
// ---------------------------------------------------------------------------

/// Write one image per frame, in table order, with fixed axis limits.
///
/// Stops at the first failing frame; frames written before it stay on disk.
pub fn render(
    table: &MarkerTable,
    bounds: &Bounds,
    selection: AxisSelection,
    config: &RenderConfig,
) -> Result<Vec<PathBuf>> {
    let stride = table.stride();
    if selection.horizontal() >= stride || selection.vertical() >= stride {
        return Err(PointLightError::config(format!(
            "axis offsets ({}, {}) out of range for stride {stride}",
            selection.horizontal(),
            selection.vertical()
        )));
    }

    let count = frame_count(table.len(), config.frame_limit)?;
    if count == 0 {
        log::info!("No frames to render");
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(&config.output_dir)?;
    log::info!(
        "Rendering {count} frames to {} with bounds {bounds}",
        config.output_dir.display()
    );

    let mut written = Vec::with_capacity(count);
    let mut warned_clipping = false;
    for (frame, row) in table.rows().take(count).enumerate() {
        let (path, clipped) = render_frame(frame, row, stride, bounds, selection, config)?;
        if clipped > 0 && !warned_clipping {
            log::warn!(
                "Frame {frame}: {clipped} markers fall outside the axis limits and are clipped; \
                 outward or exact rounding keeps every marker visible"
            );
            warned_clipping = true;
        } else if clipped > 0 {
            log::debug!("Frame {frame}: {clipped} markers clipped");
        }
        log::debug!("Wrote frame {frame} to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Draw and save one frame. Returns its path and the number of clipped markers.
fn render_frame(
    frame: usize,
    row: &[f64],
    stride: usize,
    bounds: &Bounds,
    selection: AxisSelection,
    config: &RenderConfig,
) -> Result<(PathBuf, usize)> {
    let (xs, ys) = frame_coordinates(row, stride, selection);
    let clipped = xs
        .iter()
        .zip(&ys)
        .filter(|(x, y)| !bounds.contains(**x, **y))
        .count();

    let path = frame_path(&config.output_dir, frame);
    let img = draw_scatter(&xs, &ys, bounds, &config.canvas);
    img.save_with_format(&path, ImageFormat::Png)
        .map_err(|e| PointLightError::frame(frame, format!("writing {}: {e}", path.display())))?;
    Ok((path, clipped))
}
