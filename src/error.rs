//! Error types for loading and rendering marker tables.

use std::path::PathBuf;

/// Top-level error type for point-light operations.
#[derive(Debug, thiserror::Error)]
pub enum PointLightError {
    #[error("Cannot read marker table {path}: {source}")]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed marker table{}: {message}", row_suffix(.row))]
    MalformedTable { row: Option<usize>, message: String },

    #[error("Failed to render frame {frame}: {message}")]
    FrameRender { frame: usize, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using PointLightError.
pub type Result<T> = std::result::Result<T, PointLightError>;

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {r}"),
        None => String::new(),
    }
}

impl PointLightError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedTable {
            row: None,
            message: msg.into(),
        }
    }

    pub fn malformed_row(row: usize, msg: impl Into<String>) -> Self {
        Self::MalformedTable {
            row: Some(row),
            message: msg.into(),
        }
    }

    pub fn frame(frame: usize, msg: impl Into<String>) -> Self {
        Self::FrameRender {
            frame,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_is_named_in_message() {
        let err = PointLightError::malformed_row(5, "expected 6 columns, found 5");
        assert_eq!(
            err.to_string(),
            "Malformed marker table at row 5: expected 6 columns, found 5"
        );
    }

    #[test]
    fn malformed_without_row_has_no_suffix() {
        let err = PointLightError::malformed("7 marker columns is not a multiple of stride 3");
        assert_eq!(
            err.to_string(),
            "Malformed marker table: 7 marker columns is not a multiple of stride 3"
        );
    }
}
