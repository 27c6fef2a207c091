use std::path::PathBuf;

use crate::config::RunConfig;
use crate::data::loader;
use crate::data::model::AxisSelection;
use crate::error::Result;
use crate::render::assembly::AssemblyHint;
use crate::render::{compute_bounds, render, Bounds};

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    /// Frame images in frame order.
    pub frames: Vec<PathBuf>,
    pub bounds: Bounds,
    pub assembly: AssemblyHint,
}

/// Load the table, fix the bounds, write every frame.
pub fn run(config: &RunConfig) -> Result<RenderSummary> {
    let source = config.source_path()?;
    let loader_config = config.loader_config()?;
    let table = loader::load(source, &loader_config)?;

    let [horizontal, vertical] = config.axis_selection;
    let selection = AxisSelection::resolve(horizontal, vertical, table.layout())?;
    let render_config = config.render_config(table.marker_count())?;

    let bounds = compute_bounds(&table, selection, config.rounding);
    log::info!("Axis limits ({horizontal} vs {vertical}, {:?}): {bounds}", config.rounding);

    let frames = render(&table, &bounds, selection, &render_config)?;
    Ok(RenderSummary {
        frames,
        bounds,
        assembly: AssemblyHint::new(&config.output_dir, config.frame_rate),
    })
}
