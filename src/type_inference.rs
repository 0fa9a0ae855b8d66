use std::collections::HashMap;

use log::debug;
use regex::Regex;

use crate::data::column_type::{CandidateSet, ColumnType};
use crate::data::document::Row;
use crate::errors::{MiniDbError, Result};

// ASCII digits only. `\d` would also match other unicode digits, which `str::parse` rejects.
const INTEGER_PATTERN: &str = r"^-?[0-9]+$";
const NUMBER_PATTERN: &str = r"^-?[0-9]*\.?[0-9]+$";

/// Narrows every column down to the smallest type that can hold all of its values.
///
/// Each column starts out with all types as candidates. Every cell then removes the types it is not valid
/// for, so whatever survives is valid for the entire column. The encoder relies on this.
#[derive(Debug, Clone)]
pub struct TypeInferencer {
    integer_re: Regex,
    number_re: Regex,
}

impl TypeInferencer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            integer_re: compile(INTEGER_PATTERN)?,
            number_re: compile(NUMBER_PATTERN)?,
        })
    }

    /// Can the raw cell text be stored losslessly as `t`?
    pub fn is_valid(&self, t: ColumnType, value: &str) -> bool {
        match t {
            ColumnType::String => true,
            ColumnType::Int8 => self.integer_in_range(value, i8::MIN as i64, i8::MAX as i64),
            ColumnType::UInt8 => self.integer_in_range(value, u8::MIN as i64, u8::MAX as i64),
            ColumnType::Int16 => self.integer_in_range(value, i16::MIN as i64, i16::MAX as i64),
            ColumnType::Int32 => self.integer_in_range(value, i32::MIN as i64, i32::MAX as i64),
            ColumnType::Float64 => {
                self.number_re.is_match(value)
                    && value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
            }
        }
    }

    fn integer_in_range(&self, value: &str, min: i64, max: i64) -> bool {
        // a digit string too long for i64 is out of range for all our integer types anyway
        self.integer_re.is_match(value)
            && value
                .parse::<i64>()
                .map(|v| v >= min && v <= max)
                .unwrap_or(false)
    }

    /// Removes all candidates `value` is not valid for.
    pub fn narrow(&self, candidates: &mut CandidateSet, value: &str) {
        candidates.retain(|t| self.is_valid(t, value));
    }

    /// One type per header, by position. Rows shorter than the header leave the trailing columns
    /// unconstrained, fields beyond the header are ignored.
    pub fn infer(&self, headers: &[String], rows: &[Row]) -> Vec<ColumnType> {
        let mut candidates = vec![CandidateSet::all(); headers.len()];

        for row in rows {
            for (cell, column_candidates) in row.iter().zip(candidates.iter_mut()) {
                self.narrow(column_candidates, cell);
            }
        }

        let types: Vec<ColumnType> = candidates.iter().map(CandidateSet::narrowest).collect();
        debug!(
            "inferred column types: {:?}",
            headers.iter().zip(types.iter()).collect::<Vec<_>>()
        );
        types
    }

    /// Same as [`TypeInferencer::infer`], keyed by header name. If a header name occurs more than once, the last one wins.
    pub fn infer_named(&self, headers: &[String], rows: &[Row]) -> HashMap<String, ColumnType> {
        headers
            .iter()
            .cloned()
            .zip(self.infer(headers, rows))
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| MiniDbError::ConfigError {
        msg: format!(
            "[ERROR_ON_REGEX_COMPILE] Cannot compile pattern={}. Error: {}",
            pattern, e
        ),
    })
}
