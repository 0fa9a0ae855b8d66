use log::debug;

use crate::data::column_type::ColumnType;
use crate::data::document::{Column, Document};
use crate::errors::{EncodeError, Result};

/// First byte of every MiniDB file.
pub const FORMAT_TAG: u8 = 0x11;
pub const STRING_TERMINATOR: u8 = 0x00;
pub const MDB_FILE_EXTENSION: &str = "mdb";
pub const MDB_MIME_TYPE: &str = "application/octet-stream";
pub const MDB_SUGGESTED_FILE_NAME: &str = "data.mdb";

/// `stem` plus the MiniDB file extension.
pub fn mdb_file_name(stem: &str) -> String {
    format!("{}.{}", stem, MDB_FILE_EXTENSION)
}

/// Writes a [`Document`] in the MiniDB byte layout:
///
/// ```text
/// FORMAT_TAG | num columns (u8) | (type tag, name, 0x00) per column | packed rows...
/// ```
///
/// Strings are null terminated, everything else is little-endian with the width of the column type.
/// There is no row count, a reader keeps reading rows until the input runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct MdbEncoder;

impl MdbEncoder {
    pub fn new() -> Self {
        MdbEncoder
    }

    pub fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let num_columns =
            u8::try_from(doc.num_columns()).map_err(|_| EncodeError::TooManyColumns {
                num_columns: doc.num_columns(),
            })?;

        let mut buf: Vec<u8> = Vec::with_capacity(estimate_size(doc));
        buf.push(FORMAT_TAG);
        buf.push(num_columns);

        for column in &doc.columns {
            buf.push(column.column_type.tag());
            buf.extend_from_slice(column.name.as_bytes());
            buf.push(STRING_TERMINATOR);
        }

        for (row_idx, row) in doc.rows.iter().enumerate() {
            // A short row simply ends early, nothing is padded. Extra fields are dropped.
            for (column, value) in doc.columns.iter().zip(row.iter()) {
                encode_value(&mut buf, row_idx, column, value)?;
            }
        }

        debug!(
            "encoded {} columns and {} rows into {} bytes",
            doc.num_columns(),
            doc.rows.len(),
            buf.len()
        );
        Ok(buf)
    }
}

fn encode_value(buf: &mut Vec<u8>, row: usize, column: &Column, value: &str) -> Result<()> {
    match column.column_type {
        ColumnType::String => {
            buf.extend_from_slice(value.as_bytes());
            buf.push(STRING_TERMINATOR);
        }
        ColumnType::Int8 => {
            buf.extend_from_slice(&reparse::<i8>(row, column, value)?.to_le_bytes())
        }
        ColumnType::UInt8 => {
            buf.extend_from_slice(&reparse::<u8>(row, column, value)?.to_le_bytes())
        }
        ColumnType::Int16 => {
            buf.extend_from_slice(&reparse::<i16>(row, column, value)?.to_le_bytes())
        }
        ColumnType::Int32 => {
            buf.extend_from_slice(&reparse::<i32>(row, column, value)?.to_le_bytes())
        }
        ColumnType::Float64 => {
            let v = value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| overflow(row, column, value))?;
            buf.extend_from_slice(&v.to_le_bytes());
        }
    }
    Ok(())
}

/// Integers go through i64 first, so "-0" works for the unsigned type as well.
fn reparse<T>(row: usize, column: &Column, value: &str) -> Result<T>
where
    T: TryFrom<i64>,
{
    value
        .parse::<i64>()
        .ok()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| overflow(row, column, value).into())
}

fn overflow(row: usize, column: &Column, value: &str) -> EncodeError {
    EncodeError::NumericOverflow {
        row,
        column: column.idx,
        value: String::from(value),
        target_type: column.column_type,
    }
}

fn estimate_size(doc: &Document) -> usize {
    let header: usize = doc.columns.iter().map(|c| c.name.len() + 2).sum();
    let row_width: usize = doc
        .columns
        .iter()
        .map(|c| c.column_type.width().unwrap_or(8))
        .sum();
    2 + header + doc.rows.len() * row_width
}
