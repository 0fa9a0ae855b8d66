//! Turns CSV text into the compact, typed MiniDB binary format.
//!
//! Every column is narrowed to the smallest type that holds all of its values (`INT8`, `UINT8`, `INT16`,
//! `INT32`, `FLOAT64`, falling back to `STRING`), and the rows are packed accordingly.
//!
//! ```
//! let bytes = minidb::csv_to_mdb("name,age\nAnn,30").unwrap();
//! assert_eq!(&[0x11u8, 0x02], &bytes[..2]);
//! ```

pub mod data;
pub mod encoder;
pub mod errors;
pub mod hexdump;
pub mod line_tokenizer;
pub mod type_inference;

pub mod converter;

#[cfg(feature = "jsonconf")]
pub mod conf;

pub use converter::{Conversion, MiniDbConverter, MiniDbConverterBuilder};
pub use data::column_type::ColumnType;
pub use errors::{ConversionWarning, EncodeError, MiniDbError, Result};

/// Converts with the default (comma separated, double quoted, permissive) converter.
pub fn csv_to_mdb(text: &str) -> Result<Vec<u8>> {
    let converter = MiniDbConverterBuilder::csv().build()?;
    Ok(converter.convert(text)?.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::type_inference::TypeInferencer;

    const SCENARIO: &str = "name,age,score\nAnn,30,95.5\nBob,25,88";

    fn convert(text: &str) -> Conversion {
        MiniDbConverterBuilder::csv()
            .build()
            .unwrap()
            .convert(text)
            .unwrap()
    }

    #[test]
    fn scenario_types() {
        let res = convert(SCENARIO);
        assert_eq!(Some(ColumnType::String), res.document.type_of("name"));
        assert_eq!(Some(ColumnType::Int8), res.document.type_of("age"));
        assert_eq!(Some(ColumnType::Float64), res.document.type_of("score"));
    }

    #[test]
    fn scenario_bytes() {
        let mut exp: Vec<u8> = vec![0x11, 0x03];
        exp.extend_from_slice(&[0x01, b'n', b'a', b'm', b'e', 0x00]);
        exp.extend_from_slice(&[0x11, b'a', b'g', b'e', 0x00]);
        exp.extend_from_slice(&[0x21, b's', b'c', b'o', b'r', b'e', 0x00]);
        // Ann, 30, 95.5
        exp.extend_from_slice(&[b'A', b'n', b'n', 0x00, 30]);
        exp.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0xe0, 0x57, 0x40]);
        // Bob, 25, 88.0
        exp.extend_from_slice(&[b'B', b'o', b'b', 0x00, 25]);
        exp.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x56, 0x40]);

        assert_eq!(exp, csv_to_mdb(SCENARIO).unwrap());
    }

    #[test]
    fn scenario_empty_cell_forces_string() {
        let res = convert("id,n\na,1\nb,\nc,3");
        assert_eq!(Some(ColumnType::String), res.document.type_of("n"));
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn quoting_in_the_whole_pipeline() {
        let res = convert("x,y,z\na,\"b,c\",d\na,\"b\"\"c\",d");
        assert_eq!(
            vec![vec!["a", "b,c", "d"], vec!["a", "b\"c", "d"]],
            res.document.rows
        );
    }

    #[test]
    fn ones_and_zeros_tie_break_to_int8() {
        let res = convert("flag\n1\n0\n1");
        assert_eq!(vec![ColumnType::Int8], res.document.types());
        assert_eq!(&[0x11u8, b'f', b'l', b'a', b'g', 0x00, 1, 0, 1], &res.bytes[2..]);
    }

    #[test]
    fn fixed_width_columns_use_exactly_their_width() {
        let res = convert("a,b,c,d,e\n-5,200,-300,70000,1.5\n7,0,4,-1,2");
        let types = res.document.types();
        assert_eq!(
            vec![
                ColumnType::Int8,
                ColumnType::UInt8,
                ColumnType::Int16,
                ColumnType::Int32,
                ColumnType::Float64
            ],
            types
        );
        let directory_len: usize = res.document.headers().iter().map(|h| h.len() + 2).sum();
        let row_width: usize = types.iter().filter_map(|t| t.width()).sum();
        assert_eq!(1 + 1 + 2 + 4 + 8, row_width);
        assert_eq!(2 + directory_len + 2 * row_width, res.bytes.len());
    }

    #[test]
    fn fallback_totality() {
        let inputs = [
            "a\n\n",
            "a\n\"\"",
            "a,b\nx,1e400",
            "a\n5.\n.\n-",
            "a,b\n\"unterminated",
            "\n\n\n",
            "a,a\n1,x",
        ];
        let inf = TypeInferencer::new().unwrap();
        for inp in inputs {
            let res = convert(inp);
            for (idx, column) in res.document.columns.iter().enumerate() {
                for row in &res.document.rows {
                    if let Some(cell) = row.get(idx) {
                        assert!(
                            inf.is_valid(column.column_type, cell),
                            "{:?} is not valid for {:?} in {:?}",
                            cell,
                            column.column_type,
                            inp
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn trailing_newline_forces_first_column_to_string() {
        let res = convert("a\n1\n");
        assert_eq!(vec![vec!["1"], vec![""]], res.document.rows);
        assert_eq!(vec![ColumnType::String], res.document.types());
        assert_eq!(
            vec![0x11, 0x01, 0x01, b'a', 0x00, b'1', 0x00, 0x00],
            res.bytes
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(vec![0x11, 0x01, 0x01, 0x00, 0x00], csv_to_mdb("").unwrap());
    }

    #[test]
    fn header_only_input_has_one_empty_row() {
        let res = convert("a,b");
        assert_eq!(vec![vec![""]], res.document.rows);
        assert_eq!(
            vec![ColumnType::String, ColumnType::Int8],
            res.document.types()
        );
        assert_eq!(
            vec![0x11, 0x02, 0x01, b'a', 0x00, 0x11, b'b', 0x00, 0x00],
            res.bytes
        );
        assert_eq!(
            vec![ConversionWarning::RowWidthMismatch {
                row: 0,
                expected: 2,
                found: 1
            }],
            res.warnings
        );
    }

    #[test]
    fn skipping_trailing_empty_row() {
        let conv = MiniDbConverterBuilder::csv()
            .skip_trailing_empty_row(true)
            .build()
            .unwrap();
        assert_eq!(
            vec![0x11, 0x01, 0x11, b'a', 0x00, 0x01],
            conv.convert("a\n1\n").unwrap().bytes
        );
        // no rows at all, nothing is eliminated
        assert_eq!(
            vec![0x11, 0x02, 0x11, b'a', 0x00, 0x11, b'b', 0x00],
            conv.convert("a,b").unwrap().bytes
        );
        assert_eq!(vec![0x11, 0x00], conv.convert("").unwrap().bytes);
    }

    #[test]
    fn utf8_headers_and_values() {
        let res = convert("straße\nKöln");
        assert_eq!(
            vec![
                0x11, 0x01, 0x01, b's', b't', b'r', b'a', 0xc3, 0x9f, b'e', 0x00, b'K', 0xc3,
                0xb6, b'l', b'n', 0x00
            ],
            res.bytes
        );
    }
}
