/// Render layer: global bounds, per-frame scatter drawing, numbered output.
///
/// ```text
///   MarkerTable + AxisSelection
///        │
///        ▼
///   ┌──────────┐
///   │  bounds   │  global min/max of the selected axes, rounded once
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────┐
///   │ sequence  │ ──▶ │ plot │  one canvas per frame → 1.png, 2.png, ...
///   └──────────┘     └──────┘
///        │
///        ▼
///   ┌──────────┐
///   │ assembly  │  ffmpeg command for the external video step
///   └──────────┘
/// ```

pub mod assembly;
pub mod bounds;
pub mod plot;
pub mod sequence;

pub use bounds::{compute_bounds, Bounds, RoundingPolicy};
pub use sequence::{render, RenderConfig};
