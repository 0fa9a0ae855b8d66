use std::io::Write;

use log::{debug, warn};

use crate::{
    data::document::Document,
    encoder::{MdbEncoder, MDB_MIME_TYPE, MDB_SUGGESTED_FILE_NAME},
    errors::{ConversionWarning, MiniDbError, Result},
    line_tokenizer::{CsvTokenizer, HeaderMode, TokenizerStats},
    type_inference::TypeInferencer,
};

/// Everything one conversion produced. The bytes are the only thing worth keeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub document: Document,
    pub bytes: Vec<u8>,
    pub warnings: Vec<ConversionWarning>,
    pub stats: TokenizerStats,
}

impl Conversion {
    /// Hands the finished bytes over to some sink (file, socket, ...) in one go.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(&self.bytes)?;
        sink.flush()?;
        Ok(())
    }

    pub fn suggested_file_name(&self) -> &'static str {
        MDB_SUGGESTED_FILE_NAME
    }

    pub fn mime_type(&self) -> &'static str {
        MDB_MIME_TYPE
    }
}

/// CSV text in, MiniDB bytes out. Tokenize, infer, encode, strictly in that order.
#[derive(Debug, Clone)]
pub struct MiniDbConverter {
    pub strict: bool,
    tokenizer: CsvTokenizer,
    inferencer: TypeInferencer,
    encoder: MdbEncoder,
}

impl MiniDbConverter {
    pub fn builder() -> MiniDbConverterBuilder {
        MiniDbConverterBuilder::new()
    }

    pub fn header_mode(&self) -> HeaderMode {
        self.tokenizer.header_mode
    }

    pub fn strips_cr(&self) -> bool {
        self.tokenizer.strip_cr
    }

    pub fn skips_trailing_empty_row(&self) -> bool {
        self.tokenizer.skip_trailing_empty_row
    }

    pub fn convert(&self, text: &str) -> Result<Conversion> {
        let tokenized = self.tokenizer.tokenize(text);

        let types = self
            .inferencer
            .infer(&tokenized.headers, &tokenized.rows);
        let document = Document::new(tokenized.headers, &types, tokenized.rows);

        let mut warnings = tokenized.warnings;
        warnings.extend(document.row_width_mismatches());
        for w in &warnings {
            if self.strict {
                return Err(MiniDbError::Rejected(w.clone()));
            }
            warn!("{}", w);
        }

        let bytes = self.encoder.encode(&document)?;
        debug!(
            "converted {} bytes of csv into {} bytes, {} warning(s)",
            tokenized.stats.bytes_read,
            bytes.len(),
            warnings.len()
        );

        Ok(Conversion {
            document,
            bytes,
            warnings,
            stats: tokenized.stats,
        })
    }
}

pub struct MiniDbConverterBuilder {
    separator_char: Option<char>,
    enclosure_char: Option<char>,
    header_mode: HeaderMode,
    strict: bool,
    strip_cr: bool,
    skip_trailing_empty_row: bool,
}

impl MiniDbConverterBuilder {
    pub fn new() -> Self {
        Self {
            separator_char: None,
            enclosure_char: Some('"'),
            header_mode: HeaderMode::Unified,
            strict: false,
            strip_cr: false,
            skip_trailing_empty_row: false,
        }
    }

    pub fn csv() -> Self {
        Self {
            separator_char: Some(','),
            enclosure_char: Some('"'),
            header_mode: HeaderMode::Unified,
            strict: false,
            strip_cr: false,
            skip_trailing_empty_row: false,
        }
    }

    pub fn separator_char(mut self, c: char) -> MiniDbConverterBuilder {
        self.separator_char = Some(c);
        self
    }

    pub fn enclosure_char(mut self, c: Option<char>) -> MiniDbConverterBuilder {
        self.enclosure_char = c;
        self
    }

    pub fn header_mode(mut self, m: HeaderMode) -> MiniDbConverterBuilder {
        self.header_mode = m;
        self
    }

    pub fn strict(mut self, b: bool) -> MiniDbConverterBuilder {
        self.strict = b;
        self
    }

    /// Treat `\r\n` as a line ending instead of keeping the `\r` as part of the last field.
    pub fn strip_cr(mut self, b: bool) -> MiniDbConverterBuilder {
        self.strip_cr = b;
        self
    }

    /// Don't turn a trailing newline into an extra row with one empty field.
    pub fn skip_trailing_empty_row(mut self, b: bool) -> MiniDbConverterBuilder {
        self.skip_trailing_empty_row = b;
        self
    }

    pub fn build(self) -> Result<MiniDbConverter> {
        let separator_char = self.separator_char.ok_or_else(|| MiniDbError::ConfigError {
            msg: String::from("mandatory 'separator character' is not set! (use the convenience function '::csv()' or set the separator character manually)"),
        })?;
        if matches!(separator_char, '\n' | '\r') {
            return Err(MiniDbError::ConfigError {
                msg: String::from("'separator character' must not be a line break"),
            });
        }
        if let Some(encl) = self.enclosure_char {
            if matches!(encl, '\n' | '\r') {
                return Err(MiniDbError::ConfigError {
                    msg: String::from("'enclosure character' must not be a line break"),
                });
            }
            if encl == separator_char {
                return Err(MiniDbError::ConfigError {
                    msg: format!(
                        "'separator character' and 'enclosure character' must differ, both are {:?}",
                        encl
                    ),
                });
            }
        }

        Ok(MiniDbConverter {
            strict: self.strict,
            tokenizer: CsvTokenizer::new(separator_char, self.enclosure_char, self.header_mode)
                .with_strip_cr(self.strip_cr)
                .with_skip_trailing_empty_row(self.skip_trailing_empty_row),
            inferencer: TypeInferencer::new()?,
            encoder: MdbEncoder::new(),
        })
    }
}

impl Default for MiniDbConverterBuilder {
    fn default() -> Self {
        Self::csv()
    }
}
