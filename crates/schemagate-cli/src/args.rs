//! # Command-Line Arguments
//!
//! The clap surface and its conversion into [`RunOptions`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use schemagate_core::{
    KeyCase, OptionsError, ReportFormat, RunOptions, DEFAULT_BASE_URL, DEFAULT_CACHE_PATH,
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_KEY_SCAN_LIMIT,
};

/// Validate a JSON payload against a JSON Schema.
///
/// The schema is taken from --schema-file if given (no cache, no network),
/// otherwise from the cache file, otherwise fetched from the remote service
/// and cached.
#[derive(Parser, Debug)]
#[command(name = "schemagate", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Read the payload from this file instead of standard input.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Use this local schema file; disables cache and network entirely.
    #[arg(long, value_name = "PATH")]
    pub schema_file: Option<PathBuf>,

    /// Schema cache file location.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CACHE_PATH)]
    pub schema_cache: PathBuf,

    /// Disable cache read and write.
    #[arg(long)]
    pub no_cache: bool,

    /// Base URL for the computed remote schema URL.
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Full schema URL; bypasses the base URL.
    #[arg(long, value_name = "URL")]
    pub schema_url: Option<String>,

    /// Warn when payload keys do not follow this naming convention.
    #[arg(long, value_enum, value_name = "CASE")]
    pub expect_case: Option<ExpectedCase>,

    /// Remote fetch timeout in seconds; 0 waits indefinitely.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Maximum number of keys inspected by the key-case check.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_KEY_SCAN_LIMIT)]
    pub max_keys: usize,

    /// Report format on standard output.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Naming conventions accepted by `--expect-case`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExpectedCase {
    Camel,
    Snake,
    Dash,
}

impl From<ExpectedCase> for KeyCase {
    fn from(case: ExpectedCase) -> Self {
        match case {
            ExpectedCase::Camel => KeyCase::Camel,
            ExpectedCase::Snake => KeyCase::Snake,
            ExpectedCase::Dash => KeyCase::Dash,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    /// Freeze the parsed arguments into run options.
    ///
    /// # Errors
    ///
    /// Propagates [`OptionsError`] for malformed URLs or a zero key cap.
    pub fn to_options(&self) -> Result<RunOptions, OptionsError> {
        let mut builder = RunOptions::builder()
            .cache_path(&self.schema_cache)
            .base_url(&self.base_url)
            .fetch_timeout_secs(self.timeout_secs)
            .key_scan_limit(self.max_keys)
            .report_format(self.format.into());

        if let Some(path) = &self.json {
            builder = builder.payload_file(path);
        }
        if let Some(path) = &self.schema_file {
            builder = builder.schema_file(path);
        }
        if self.no_cache {
            builder = builder.no_cache();
        }
        if let Some(url) = &self.schema_url {
            builder = builder.schema_url(url);
        }
        if let Some(case) = self.expect_case {
            builder = builder.expect_case(case.into());
        }

        builder.build()
    }
}
