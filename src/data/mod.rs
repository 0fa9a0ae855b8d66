pub mod column_type;
pub mod document;
