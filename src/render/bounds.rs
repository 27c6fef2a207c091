use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::model::{AxisSelection, MarkerTable};
use crate::error::PointLightError;

// ---------------------------------------------------------------------------
// Rounding policy
// ---------------------------------------------------------------------------

/// How the global extrema are rounded before being used as axis limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Integer truncation toward zero. Points within one unit of the edge
    /// may fall outside the limits and get clipped.
    #[default]
    Truncate,
    /// Floor the minimum, ceil the maximum: integer limits that always
    /// contain every point.
    Outward,
    /// Keep full precision.
    Exact,
}

impl RoundingPolicy {
    fn apply(self, min: f64, max: f64) -> (f64, f64) {
        match self {
            RoundingPolicy::Truncate => (min.trunc(), max.trunc()),
            RoundingPolicy::Outward => (min.floor(), max.ceil()),
            RoundingPolicy::Exact => (min, max),
        }
    }
}

impl FromStr for RoundingPolicy {
    type Err = PointLightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "outward" => Ok(Self::Outward),
            "exact" => Ok(Self::Exact),
            other => Err(PointLightError::config(format!(
                "unknown rounding policy '{other}' (expected truncate, outward or exact)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Axis limits shared by every frame of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x [{}, {}], y [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

/// Global limits of the selected axes over every frame.
///
/// Only columns whose offset within a marker group matches one of the
/// selected axes are scanned. An empty table yields `Bounds::default()`.
pub fn compute_bounds(
    table: &MarkerTable,
    selection: AxisSelection,
    rounding: RoundingPolicy,
) -> Bounds {
    let stride = table.stride();
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);

    for row in table.rows() {
        for (col, &value) in row.iter().enumerate() {
            let offset = col % stride;
            let range = if offset == selection.horizontal() {
                &mut x
            } else if offset == selection.vertical() {
                &mut y
            } else {
                continue;
            };
            range.0 = range.0.min(value);
            range.1 = range.1.max(value);
        }
    }

    if x.0 > x.1 || y.0 > y.1 {
        return Bounds::default();
    }

    let (min_x, max_x) = rounding.apply(x.0, x.1);
    let (min_y, max_y) = rounding.apply(y.0, y.1);
    Bounds {
        min_x,
        max_x,
        min_y,
        max_y,
    }
}
