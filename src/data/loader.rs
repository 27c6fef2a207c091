use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{Axis, CoordinateLayout, MarkerTable};
use crate::error::{PointLightError, Result};

// ---------------------------------------------------------------------------
// Loader configuration
// ---------------------------------------------------------------------------

/// How to turn a raw capture export into a [`MarkerTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Columns per marker in the raw file (2 or 3).
    pub coordinate_stride: usize,
    /// Remove the Y column of every marker before axis selection.
    pub drop_y_axis: bool,
    /// Raw column index from which every column is treated as padding.
    ///
    /// Never inferred from content. A value that does not match the capture
    /// setup either drops real marker data or keeps padding in the table, so
    /// callers must check it against their device's export layout. `None`
    /// keeps every column.
    pub padding_column_threshold: Option<usize>,
    /// Non-marker columns at the start of each row (e.g. a frame counter).
    pub leading_columns: usize,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            coordinate_stride: 3,
            drop_y_axis: false,
            padding_column_threshold: None,
            leading_columns: 0,
            delimiter: b',',
        }
    }
}

impl LoaderConfig {
    /// Layout of the table this configuration produces.
    pub fn output_layout(&self) -> Result<CoordinateLayout> {
        let raw = CoordinateLayout::for_stride(self.coordinate_stride)?;
        if self.drop_y_axis {
            raw.without(Axis::Y)
        } else {
            Ok(raw)
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a headerless delimited marker table from disk.
pub fn load(path: &Path, config: &LoaderConfig) -> Result<MarkerTable> {
    let missing = |source: std::io::Error| PointLightError::MissingFile {
        path: path.to_path_buf(),
        source,
    };
    let metadata = path.metadata().map_err(missing)?;
    if !metadata.is_file() {
        return Err(missing(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    let file = File::open(path).map_err(missing)?;
    let table = load_from_reader(file, config).map_err(|e| match e {
        PointLightError::Io(source) => missing(source),
        other => other,
    })?;
    log::info!(
        "Loaded {} frames x {} markers (stride {}) from {}",
        table.len(),
        table.marker_count(),
        table.stride(),
        path.display()
    );
    Ok(table)
}

/// Parse a marker table from any reader. See [`load`].
///
/// Failures of the reader itself surface as [`PointLightError::Io`].
pub fn load_from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<MarkerTable> {
    let raw_layout = CoordinateLayout::for_stride(config.coordinate_stride)?;
    let layout = config.output_layout()?;
    let y_offset = raw_layout.offset_of(Axis::Y);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(config.delimiter)
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut shape: Option<ColumnPlan> = None;
    let mut warned_padding = false;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            let message = e.to_string();
            match e.into_kind() {
                csv::ErrorKind::Io(source) => PointLightError::Io(source),
                _ => PointLightError::malformed_row(row_no, message),
            }
        })?;

        let plan = match shape {
            Some(plan) => plan,
            None => {
                let plan = ColumnPlan::new(record.len(), config)?;
                shape = Some(plan);
                plan
            }
        };

        if record.len() != plan.raw_columns {
            return Err(PointLightError::malformed_row(
                row_no,
                format!(
                    "expected {} columns, found {}",
                    plan.raw_columns,
                    record.len()
                ),
            ));
        }

        if !warned_padding {
            if let Some(col) = (plan.end..plan.raw_columns).find(|&c| !record[c].is_empty()) {
                log::warn!(
                    "Padding column {col} holds data at row {row_no} ('{}'); \
                     check padding_column_threshold against the capture layout",
                    &record[col]
                );
                warned_padding = true;
            }
        }

        let mut row = Vec::with_capacity(plan.end - plan.start);
        for col in plan.start..plan.end {
            let offset = (col - plan.start) % raw_layout.stride();
            if config.drop_y_axis && Some(offset) == y_offset {
                continue;
            }
            row.push(parse_cell(&record[col], row_no, col)?);
        }
        rows.push(row);
    }

    MarkerTable::from_rows(rows, layout)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Raw column range holding marker data, fixed by the first record.
#[derive(Debug, Clone, Copy)]
struct ColumnPlan {
    raw_columns: usize,
    start: usize,
    end: usize,
}

impl ColumnPlan {
    fn new(raw_columns: usize, config: &LoaderConfig) -> Result<Self> {
        let end = match config.padding_column_threshold {
            Some(t) if t > raw_columns => {
                return Err(PointLightError::config(format!(
                    "padding column threshold {t} exceeds the {raw_columns} columns in the table"
                )));
            }
            Some(t) => t,
            None => raw_columns,
        };
        let start = config.leading_columns;
        if start >= end {
            return Err(PointLightError::config(format!(
                "no marker columns left between leading column count {start} and column {end}"
            )));
        }
        if (end - start) % config.coordinate_stride != 0 {
            return Err(PointLightError::malformed(format!(
                "{} marker columns is not a multiple of stride {}",
                end - start,
                config.coordinate_stride
            )));
        }
        if end < raw_columns {
            log::debug!("Dropping padding columns {end}..{raw_columns}");
        }
        Ok(Self {
            raw_columns,
            start,
            end,
        })
    }
}

fn parse_cell(cell: &str, row: usize, col: usize) -> Result<f64> {
    let value: f64 = cell.parse().map_err(|_| {
        PointLightError::malformed_row(row, format!("column {col}: '{cell}' is not a number"))
    })?;
    if !value.is_finite() {
        return Err(PointLightError::malformed_row(
            row,
            format!("column {col}: '{cell}' is not a finite number"),
        ));
    }
    Ok(value)
}
