use compact_str::CompactString;
use log::{debug, trace};

use crate::data::document::Row;
use crate::errors::ConversionWarning;

/// How the header line is tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Header is simply the first record of the full (quote/escape/newline aware) scan.
    #[default]
    Unified,
    /// Header is the raw first physical line, split by toggling on every enclosure character.
    /// No escaped enclosure characters and no multi-line headers. The body starts after the first `\n`.
    FirstLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizerStats {
    pub lines_scanned: usize,
    pub records: usize,
    pub bytes_read: usize,
}

impl TokenizerStats {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    pub warnings: Vec<ConversionWarning>,
    pub stats: TokenizerStats,
}

/// Output of a single scan, before header and body are told apart.
struct Scan {
    records: Vec<Row>,
    warnings: Vec<ConversionWarning>,
    lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTokenizer {
    max_inline_str_size: usize, // helper for compact string. We allocate the max a compact string can hold on the stack
    pub delim_char: char,
    pub encl_char: Option<char>,
    pub header_mode: HeaderMode,
    /// Drop a `\r` that directly precedes a row-ending `\n` (CRLF input). Off by default, the `\r` stays in the field.
    pub strip_cr: bool,
    /// Don't emit the empty record a trailing newline leaves behind. Off by default.
    pub skip_trailing_empty_row: bool,
}

/// Tokenizes a complete, in-memory CSV text in one left-to-right pass.
///
/// Quoting follows the csv rfc (https://tools.ietf.org/html/rfc4180) loosely: the enclosure character
/// toggles "quoted" mode wherever it appears, a doubled enclosure character inside quotes is an escaped
/// literal, and separators and newlines are literal while quoted. Nothing here ever fails. Unterminated
/// quotes are reported as a [`ConversionWarning`] instead.
///
/// The body always ends with an implicit newline, so the last record is always flushed. A text ending with
/// `\n` therefore yields a final record with a single empty field, and a text holding nothing but the header
/// has a body of one empty record.
impl CsvTokenizer {
    pub fn new(delim: char, enclc: Option<char>, header_mode: HeaderMode) -> Self {
        CsvTokenizer {
            max_inline_str_size: std::mem::size_of::<String>(),
            delim_char: delim,
            encl_char: enclc,
            header_mode,
            strip_cr: false,
            skip_trailing_empty_row: false,
        }
    }

    pub fn csv() -> Self {
        CsvTokenizer::new(',', Some('"'), HeaderMode::Unified)
    }

    pub fn with_strip_cr(mut self, b: bool) -> Self {
        self.strip_cr = b;
        self
    }

    pub fn with_skip_trailing_empty_row(mut self, b: bool) -> Self {
        self.skip_trailing_empty_row = b;
        self
    }

    pub fn tokenize(&self, text: &str) -> TokenizedCsv {
        let mut stats = TokenizerStats::new();
        stats.bytes_read = text.len();

        let (headers, scan) = match self.header_mode {
            HeaderMode::Unified => {
                let mut scan = self.scan(text, 1);
                let headers = if scan.records.is_empty() {
                    Vec::new()
                } else {
                    scan.records.remove(0)
                };
                if scan.records.is_empty() && !self.skip_trailing_empty_row {
                    // the header took all of the input, what's left is the implicit newline
                    scan.records.push(vec![String::new()]);
                }
                stats.records = usize::from(!headers.is_empty()) + scan.records.len();
                (headers, scan)
            }
            HeaderMode::FirstLine => {
                let (first_line, body) = match text.split_once('\n') {
                    Some((first, rest)) => (first, rest),
                    None => (text, ""),
                };
                let first_line = match first_line.strip_suffix('\r') {
                    Some(stripped) if self.strip_cr => stripped,
                    _ => first_line,
                };
                let headers = self.split_header_line(first_line);
                let mut scan = self.scan(body, 2);
                scan.lines += 1;
                stats.records = 1 + scan.records.len();
                (headers, scan)
            }
        };
        stats.lines_scanned = scan.lines;

        debug!(
            "tokenized {} header fields and {} rows from {} bytes",
            headers.len(),
            scan.records.len(),
            stats.bytes_read
        );

        TokenizedCsv {
            headers,
            rows: scan.records,
            warnings: scan.warnings,
            stats,
        }
    }

    /// The legacy header split: every enclosure char toggles, the separator splits outside quotes.
    fn split_header_line(&self, line: &str) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();
        let mut field = CompactString::with_capacity(self.max_inline_str_size);
        let mut in_quotes = false;

        for c in line.chars() {
            match c {
                _ if Some(c) == self.encl_char => in_quotes = !in_quotes,
                _ if c == self.delim_char && !in_quotes => {
                    fields.push(std::mem::take(&mut field).to_string());
                }
                _ => field.push(c),
            }
        }
        fields.push(field.to_string());
        trace!("header line: {:?}", &fields);
        fields
    }

    /// `first_line` is only used for the line numbers in warnings.
    fn scan(&self, text: &str, first_line: usize) -> Scan {
        let mut records: Vec<Row> = Vec::new();
        let mut warnings: Vec<ConversionWarning> = Vec::new();
        let mut fields: Row = Vec::new();
        let mut field = CompactString::with_capacity(self.max_inline_str_size);
        let mut in_quotes = false;
        let mut quote_opened_on = first_line;
        let mut line = first_line;
        let mut record_started = false; // did we consume anything for the current record?

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                _ if Some(c) == self.encl_char => {
                    if in_quotes && chars.peek() == Some(&c) {
                        // escaped enclosure character, take one, skip the other
                        field.push(c);
                        chars.next();
                    } else {
                        in_quotes = !in_quotes;
                        if in_quotes {
                            quote_opened_on = line;
                        }
                    }
                    record_started = true;
                }
                _ if c == self.delim_char && !in_quotes => {
                    fields.push(std::mem::take(&mut field).to_string());
                    record_started = true;
                }
                '\r' if self.strip_cr && !in_quotes && chars.peek() == Some(&'\n') => {
                    // CR of a CRLF line ending. The LF ends the record on the next round.
                }
                '\n' if !in_quotes => {
                    fields.push(std::mem::take(&mut field).to_string());
                    trace!("line {}: {:?}", line, &fields);
                    records.push(std::mem::take(&mut fields));
                    line += 1;
                    record_started = false;
                }
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                    record_started = true;
                }
            }
        }

        // End of input acts like a final newline.
        if in_quotes {
            warnings.push(ConversionWarning::MalformedQuoting {
                line: quote_opened_on,
            });
        }
        if record_started || !self.skip_trailing_empty_row {
            fields.push(field.to_string());
            trace!("line {}: {:?}", line, &fields);
            records.push(fields);
        }

        // count the last line, unless the text ended with a newline (which already counted it)
        let lines = if text.is_empty() || text.ends_with('\n') {
            line - first_line
        } else {
            line - first_line + 1
        };

        Scan {
            records,
            warnings,
            lines,
        }
    }
}

impl Default for CsvTokenizer {
    fn default() -> Self {
        Self::csv()
    }
}
