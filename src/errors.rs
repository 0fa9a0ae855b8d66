use std::fmt::Display;
use thiserror::Error;

use crate::data::column_type::ColumnType;

#[derive(Debug, PartialEq, Clone)]
pub enum MiniDbError {
    Generic { msg: String },
    ConfigError { msg: String },
    Encode(EncodeError),
    Rejected(ConversionWarning),
}

impl Display for MiniDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MiniDbError::Generic { msg } => write!(f, "An error occurred: {:?}", msg),
            MiniDbError::ConfigError { msg } => write!(f, "Configuration error: {:?}", msg),
            MiniDbError::Encode(ee) => ee.fmt(f),
            MiniDbError::Rejected(w) => write!(f, "Rejected in strict mode: {}", w),
        }
    }
}

impl std::error::Error for MiniDbError {}

impl From<std::io::Error> for MiniDbError {
    fn from(e: std::io::Error) -> Self {
        MiniDbError::Generic { msg: e.to_string() }
    }
}

impl From<EncodeError> for MiniDbError {
    fn from(e: EncodeError) -> Self {
        MiniDbError::Encode(e)
    }
}

pub type Result<T> = std::result::Result<T, MiniDbError>;

/// Things that went sideways during a conversion, but that we can live with.
/// In strict mode, the first one of these aborts the conversion.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConversionWarning {
    #[error("Enclosure character opened on line {line:?} is never closed. Everything up to the end of input was taken as the last field.")]
    MalformedQuoting { line: usize },
    #[error("Row {row:?} has {found:?} fields, but the header has {expected:?}.")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum EncodeError {
    #[error("Cannot encode {num_columns:?} columns, the format allows at most 255.")]
    TooManyColumns { num_columns: usize },
    /// The inferencer guarantees every cell fits its column type, so this is a bug, not bad input.
    #[error("Value '{value}' in row {row:?}, column {column:?} does not re-parse as {target_type}.")]
    NumericOverflow {
        row: usize,
        column: usize,
        value: String,
        target_type: ColumnType,
    },
}
