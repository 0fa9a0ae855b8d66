use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRoot {
    pub comment: Option<String>,
    pub converter_opts: ConverterOpts,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum HeaderModeOpts {
    Unified,
    FirstLine,
}

/// A missing (or null) `enclosureChar` means: no enclosure character at all.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConverterOpts {
    pub comment: Option<String>,
    pub separator_char: char,
    pub enclosure_char: Option<char>,
    pub header_mode: Option<HeaderModeOpts>,
    pub strict: Option<bool>,
    pub strip_cr: Option<bool>,
    pub skip_trailing_empty_row: Option<bool>,
}

impl ConverterOpts {
    pub fn new(separator_char: char) -> Self {
        Self {
            comment: None,
            separator_char,
            enclosure_char: None,
            header_mode: None,
            strict: None,
            strip_cr: None,
            skip_trailing_empty_row: None,
        }
    }
    pub fn builder() -> ConverterOptsBuilder {
        ConverterOptsBuilder::new()
    }
}

pub struct ConverterOptsBuilder {
    pub comment: Option<String>,
    pub enclosure_char: Option<char>,
    pub header_mode: Option<HeaderModeOpts>,
    pub strict: Option<bool>,
    pub strip_cr: Option<bool>,
    pub skip_trailing_empty_row: Option<bool>,
}
impl ConverterOptsBuilder {
    pub fn new() -> Self {
        Self {
            comment: None,
            enclosure_char: None,
            header_mode: None,
            strict: None,
            strip_cr: None,
            skip_trailing_empty_row: None,
        }
    }
    pub fn with_comment(&mut self, comment: &str) -> &mut Self {
        self.comment = Some(String::from(comment));
        self
    }
    pub fn with_enclosure_char(&mut self, c: char) -> &mut Self {
        self.enclosure_char = Some(c);
        self
    }
    pub fn with_header_mode(&mut self, m: HeaderModeOpts) -> &mut Self {
        self.header_mode = Some(m);
        self
    }
    pub fn with_strict(&mut self, b: bool) -> &mut Self {
        self.strict = Some(b);
        self
    }
    pub fn with_strip_cr(&mut self, b: bool) -> &mut Self {
        self.strip_cr = Some(b);
        self
    }
    pub fn with_skip_trailing_empty_row(&mut self, b: bool) -> &mut Self {
        self.skip_trailing_empty_row = Some(b);
        self
    }
    pub fn build_with_separator_char(&mut self, separator_char: char) -> ConverterOpts {
        ConverterOpts {
            comment: std::mem::take(&mut self.comment),
            separator_char,
            enclosure_char: self.enclosure_char.take(),
            header_mode: self.header_mode.take(),
            strict: self.strict.take(),
            strip_cr: self.strip_cr.take(),
            skip_trailing_empty_row: self.skip_trailing_empty_row.take(),
        }
    }
}

impl Default for ConverterOptsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
