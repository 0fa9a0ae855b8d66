use crate::errors::ConversionWarning;

use super::column_type::ColumnType;

/// One tokenized CSV record. May be shorter (or longer) than the header.
pub type Row = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String, // the column header
    pub idx: usize,   // columns are zero-indexed
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: String, idx: usize, column_type: ColumnType) -> Self {
        Column {
            name,
            idx,
            column_type,
        }
    }
}

/// Columns with their resolved types, plus the untouched string rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Document {
    /// `types` is expected to run parallel to `headers`. Headers without a type become String columns.
    pub fn new(headers: Vec<String>, types: &[ColumnType], rows: Vec<Row>) -> Self {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let column_type = types.get(idx).copied().unwrap_or(ColumnType::String);
                Column::new(name, idx, column_type)
            })
            .collect();
        Document { columns, rows }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|c| c.column_type).collect()
    }

    /// Type of the first column with the given header name.
    pub fn type_of(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.column_type)
    }

    /// One warning per row whose field count differs from the number of columns. Rows are zero-indexed.
    pub fn row_width_mismatches(&self) -> Vec<ConversionWarning> {
        let expected = self.num_columns();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != expected)
            .map(|(row, r)| ConversionWarning::RowWidthMismatch {
                row,
                expected,
                found: r.len(),
            })
            .collect()
    }
}
