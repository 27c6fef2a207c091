/// Data layer: marker table types and loading.
///
/// Architecture:
/// ```text
///  capture export (.csv / .tsv, no header)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  strip leading / padding columns, optional Y drop
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ MarkerTable  │  frames × dense 0-based coordinate columns
///   └─────────────┘
/// ```

pub mod loader;
pub mod model;
