//! Point-light display rendering for motion-capture marker tables.
//!
//! A run loads a headerless marker table ([`data::loader`]), computes axis
//! limits once for the whole recording ([`render::bounds`]) and writes one
//! scatter image per frame named `1.png`, `2.png`, ... ([`render::sequence`])
//! for an external tool to assemble into video.

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;

pub use config::RunConfig;
pub use error::{PointLightError, Result};
pub use pipeline::{run, RenderSummary};
