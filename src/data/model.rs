use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PointLightError, Result};

// ---------------------------------------------------------------------------
// Axis – one coordinate role of a marker
// ---------------------------------------------------------------------------

/// A spatial coordinate role as recorded by the capture system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

impl FromStr for Axis {
    type Err = PointLightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(PointLightError::config(format!(
                "unknown axis label '{other}' (expected x, y or z)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// CoordinateLayout – which axes each marker's column group carries
// ---------------------------------------------------------------------------

/// The ordered axes in every marker's column group. Its length is the
/// coordinate stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateLayout {
    axes: Vec<Axis>,
}

impl CoordinateLayout {
    /// Layout of a freshly loaded capture: stride 3 is spatial (X, Y, Z),
    /// stride 2 is planar (X, Y).
    pub fn for_stride(stride: usize) -> Result<Self> {
        match stride {
            2 => Ok(Self {
                axes: vec![Axis::X, Axis::Y],
            }),
            3 => Ok(Self {
                axes: vec![Axis::X, Axis::Y, Axis::Z],
            }),
            other => Err(PointLightError::config(format!(
                "coordinate stride must be 2 or 3, got {other}"
            ))),
        }
    }

    /// The layout left after removing one axis from every marker group.
    pub fn without(&self, axis: Axis) -> Result<Self> {
        if self.axes.len() < 3 {
            return Err(PointLightError::config(format!(
                "cannot drop the {axis} axis from a stride-{} layout",
                self.axes.len()
            )));
        }
        if !self.axes.contains(&axis) {
            return Err(PointLightError::config(format!(
                "layout has no {axis} axis to drop"
            )));
        }
        Ok(Self {
            axes: self.axes.iter().copied().filter(|a| *a != axis).collect(),
        })
    }

    pub fn stride(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Offset of `axis` inside a marker group, if the layout carries it.
    pub fn offset_of(&self, axis: Axis) -> Option<usize> {
        self.axes.iter().position(|a| *a == axis)
    }
}

// ---------------------------------------------------------------------------
// AxisSelection – the two axes plotted against each other
// ---------------------------------------------------------------------------

/// Stride offsets of the axes drawn horizontally and vertically.
///
/// Only built through [`AxisSelection::resolve`], so the two offsets are
/// always distinct and valid for the layout they were resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelection {
    horizontal: usize,
    vertical: usize,
}

impl AxisSelection {
    pub fn horizontal(&self) -> usize {
        self.horizontal
    }

    pub fn vertical(&self) -> usize {
        self.vertical
    }

    /// Resolve a pair of role labels against a layout.
    pub fn resolve(horizontal: Axis, vertical: Axis, layout: &CoordinateLayout) -> Result<Self> {
        if horizontal == vertical {
            return Err(PointLightError::config(format!(
                "axis selection must name two distinct axes, got {horizontal} twice"
            )));
        }
        let offset = |axis: Axis| {
            layout.offset_of(axis).ok_or_else(|| {
                PointLightError::config(format!(
                    "axis {axis} is not present in the table (available: {})",
                    layout
                        .axes()
                        .iter()
                        .map(|a| a.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
        };
        Ok(Self {
            horizontal: offset(horizontal)?,
            vertical: offset(vertical)?,
        })
    }
}

// ---------------------------------------------------------------------------
// MarkerTable – the cleaned capture
// ---------------------------------------------------------------------------

/// Marker coordinates over time, one row per frame.
///
/// Values are stored row-major; every row has `columns` entries and column
/// `c` belongs to marker `c / stride`, axis offset `c % stride`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTable {
    values: Vec<f64>,
    frames: usize,
    columns: usize,
    layout: CoordinateLayout,
}

impl MarkerTable {
    /// Build a table from per-frame rows, checking shape and finiteness.
    pub fn from_rows(rows: Vec<Vec<f64>>, layout: CoordinateLayout) -> Result<Self> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns % layout.stride() != 0 {
            return Err(PointLightError::malformed(format!(
                "{columns} marker columns is not a multiple of stride {}",
                layout.stride()
            )));
        }

        let frames = rows.len();
        let mut values = Vec::with_capacity(frames * columns);
        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() != columns {
                return Err(PointLightError::malformed_row(
                    row_no,
                    format!("expected {columns} columns, found {}", row.len()),
                ));
            }
            if let Some(col) = row.iter().position(|v| !v.is_finite()) {
                return Err(PointLightError::malformed_row(
                    row_no,
                    format!("column {col} is not a finite number"),
                ));
            }
            values.extend(row);
        }

        Ok(Self {
            values,
            frames,
            columns,
            layout,
        })
    }

    /// Number of frames (rows).
    pub fn len(&self) -> usize {
        self.frames
    }

    /// Whether the table has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn layout(&self) -> &CoordinateLayout {
        &self.layout
    }

    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    pub fn marker_count(&self) -> usize {
        self.columns / self.layout.stride()
    }

    /// Coordinates of one frame.
    pub fn row(&self, frame: usize) -> Option<&[f64]> {
        if frame >= self.frames {
            return None;
        }
        let start = frame * self.columns;
        Some(&self.values[start..start + self.columns])
    }

    /// Frames in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.frames).filter_map(move |i| self.row(i))
    }
}
