use crate::{
    conf::jsonconf::{ConfigRoot, ConverterOpts, HeaderModeOpts},
    converter::{MiniDbConverter, MiniDbConverterBuilder},
    errors::{MiniDbError, Result},
    line_tokenizer::HeaderMode,
};

impl From<HeaderModeOpts> for HeaderMode {
    fn from(opts: HeaderModeOpts) -> Self {
        match opts {
            HeaderModeOpts::Unified => HeaderMode::Unified,
            HeaderModeOpts::FirstLine => HeaderMode::FirstLine,
        }
    }
}

impl From<ConverterOpts> for MiniDbConverterBuilder {
    fn from(opts: ConverterOpts) -> Self {
        MiniDbConverterBuilder::new()
            .separator_char(opts.separator_char)
            .enclosure_char(opts.enclosure_char)
            .header_mode(opts.header_mode.map(HeaderMode::from).unwrap_or_default())
            .strict(opts.strict.unwrap_or(false))
            .strip_cr(opts.strip_cr.unwrap_or(false))
            .skip_trailing_empty_row(opts.skip_trailing_empty_row.unwrap_or(false))
    }
}

impl TryFrom<ConfigRoot> for MiniDbConverter {
    type Error = MiniDbError;

    fn try_from(cfg: ConfigRoot) -> Result<MiniDbConverter> {
        MiniDbConverterBuilder::from(cfg.converter_opts).build()
    }
}

impl MiniDbConverter {
    pub fn from_json_str(json: &str) -> Result<MiniDbConverter> {
        let cfg: ConfigRoot = serde_json::from_str(json).map_err(|e| MiniDbError::ConfigError {
            msg: format!("[ERROR_ON_JSON_CONFIG] Cannot read converter config. Error: {}", e),
        })?;
        MiniDbConverter::try_from(cfg)
    }
}
