//! # Run Options
//!
//! The single configuration object of a run. It is assembled once from
//! command-line arguments via [`RunOptionsBuilder`], validated, and then
//! only ever read. Components receive `&RunOptions` at their entry points.
//!
//! ## Defaults
//!
//! | Setting | Default |
//! |---|---|
//! | cache file | [`DEFAULT_CACHE_PATH`] |
//! | base URL | [`DEFAULT_BASE_URL`] |
//! | remote path | [`SCHEMA_RESOURCE_PATH`] appended to the base URL |
//! | fetch timeout | [`DEFAULT_FETCH_TIMEOUT_SECS`] seconds |
//! | key scan cap | [`DEFAULT_KEY_SCAN_LIMIT`] keys |

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::case::KeyCase;
use crate::error::OptionsError;

/// Default location of the schema cache file, relative to the working directory.
pub const DEFAULT_CACHE_PATH: &str = ".cache/schemagate/claim.schema.json";

/// Default base URL of the remote schema service (sandbox environment).
pub const DEFAULT_BASE_URL: &str = "https://sandbox-api.va.gov/services/claims/v2";

/// Resource path appended to the base URL to locate the schema document.
pub const SCHEMA_RESOURCE_PATH: &str = "/schemas/526.json";

/// Default timeout for the remote schema fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Maximum number of object keys inspected by the key-case heuristic.
pub const DEFAULT_KEY_SCAN_LIMIT: usize = 200;

/// Where the payload text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PayloadSource {
    /// Read until end-of-stream from standard input.
    #[default]
    Stdin,
    /// Read the named file.
    File(PathBuf),
}

/// Schema cache behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachePolicy {
    /// Read from and populate the cache file at this path.
    Enabled(PathBuf),
    /// Never read or write a cache file.
    Disabled,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::Enabled(PathBuf::from(DEFAULT_CACHE_PATH))
    }
}

/// Report rendering on standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

/// Immutable configuration for one run.
///
/// Construct with [`RunOptions::builder`]. All fields are private; the
/// accessors below are the only way to read them.
#[derive(Debug, Clone)]
pub struct RunOptions {
    payload: PayloadSource,
    schema_file: Option<PathBuf>,
    cache: CachePolicy,
    base_url: String,
    schema_url: Option<String>,
    expect_case: KeyCase,
    fetch_timeout: Option<Duration>,
    key_scan_limit: usize,
    report_format: ReportFormat,
}

impl RunOptions {
    /// Start building options from the documented defaults.
    pub fn builder() -> RunOptionsBuilder {
        RunOptionsBuilder::default()
    }

    /// Payload source.
    pub fn payload(&self) -> &PayloadSource {
        &self.payload
    }

    /// Explicit local schema file. When set, cache and network are never used.
    pub fn schema_file(&self) -> Option<&Path> {
        self.schema_file.as_deref()
    }

    /// Cache policy.
    pub fn cache(&self) -> &CachePolicy {
        &self.cache
    }

    /// Cache file path, or `None` when caching is disabled.
    pub fn cache_path(&self) -> Option<&Path> {
        match &self.cache {
            CachePolicy::Enabled(path) => Some(path),
            CachePolicy::Disabled => None,
        }
    }

    /// Base URL used to compute the remote schema URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full override URL, if configured.
    pub fn schema_url(&self) -> Option<&str> {
        self.schema_url.as_deref()
    }

    /// The URL the remote strategy fetches: the override if present,
    /// otherwise the base URL with [`SCHEMA_RESOURCE_PATH`] appended.
    pub fn remote_schema_url(&self) -> String {
        match &self.schema_url {
            Some(url) => url.clone(),
            None => format!(
                "{}{}",
                self.base_url.trim_end_matches('/'),
                SCHEMA_RESOURCE_PATH
            ),
        }
    }

    /// Expected key case. `Unknown` disables the mismatch warning.
    pub fn expect_case(&self) -> KeyCase {
        self.expect_case
    }

    /// Timeout for the remote fetch; `None` waits indefinitely.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }

    /// Cap on keys inspected by the key-case heuristic.
    pub fn key_scan_limit(&self) -> usize {
        self.key_scan_limit
    }

    /// Report format.
    pub fn report_format(&self) -> ReportFormat {
        self.report_format
    }
}

/// Builder for [`RunOptions`].
#[derive(Debug, Clone)]
pub struct RunOptionsBuilder {
    payload: PayloadSource,
    schema_file: Option<PathBuf>,
    cache: CachePolicy,
    base_url: String,
    schema_url: Option<String>,
    expect_case: KeyCase,
    fetch_timeout: Option<Duration>,
    key_scan_limit: usize,
    report_format: ReportFormat,
}

impl Default for RunOptionsBuilder {
    fn default() -> Self {
        Self {
            payload: PayloadSource::default(),
            schema_file: None,
            cache: CachePolicy::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            schema_url: None,
            expect_case: KeyCase::Unknown,
            fetch_timeout: Some(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)),
            key_scan_limit: DEFAULT_KEY_SCAN_LIMIT,
            report_format: ReportFormat::default(),
        }
    }
}

impl RunOptionsBuilder {
    /// Read the payload from `path` instead of stdin.
    pub fn payload_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.payload = PayloadSource::File(path.into());
        self
    }

    /// Use a local schema file exclusively.
    pub fn schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_file = Some(path.into());
        self
    }

    /// Cache file location. Re-enables caching if it was disabled earlier.
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache = CachePolicy::Enabled(path.into());
        self
    }

    /// Disable cache reads and writes.
    pub fn no_cache(mut self) -> Self {
        self.cache = CachePolicy::Disabled;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn schema_url(mut self, url: impl Into<String>) -> Self {
        self.schema_url = Some(url.into());
        self
    }

    pub fn expect_case(mut self, case: KeyCase) -> Self {
        self.expect_case = case;
        self
    }

    /// Remote fetch timeout; `None` disables it.
    pub fn fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Timeout in whole seconds, where `0` means no timeout.
    pub fn fetch_timeout_secs(self, secs: u64) -> Self {
        let timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self.fetch_timeout(timeout)
    }

    pub fn key_scan_limit(mut self, limit: usize) -> Self {
        self.key_scan_limit = limit;
        self
    }

    pub fn report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidUrl`] if the base URL or the override
    /// URL does not parse, and [`OptionsError::ZeroKeyScanLimit`] for a zero
    /// key cap.
    pub fn build(self) -> Result<RunOptions, OptionsError> {
        check_url("base URL", &self.base_url)?;
        if let Some(url) = &self.schema_url {
            check_url("schema URL", url)?;
        }
        if self.key_scan_limit == 0 {
            return Err(OptionsError::ZeroKeyScanLimit);
        }

        Ok(RunOptions {
            payload: self.payload,
            schema_file: self.schema_file,
            cache: self.cache,
            base_url: self.base_url,
            schema_url: self.schema_url,
            expect_case: self.expect_case,
            fetch_timeout: self.fetch_timeout,
            key_scan_limit: self.key_scan_limit,
            report_format: self.report_format,
        })
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), OptionsError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| OptionsError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = RunOptions::builder().build().unwrap();
        assert_eq!(opts.payload(), &PayloadSource::Stdin);
        assert!(opts.schema_file().is_none());
        assert_eq!(opts.cache_path(), Some(Path::new(DEFAULT_CACHE_PATH)));
        assert_eq!(opts.base_url(), DEFAULT_BASE_URL);
        assert_eq!(opts.expect_case(), KeyCase::Unknown);
        assert_eq!(
            opts.fetch_timeout(),
            Some(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
        );
        assert_eq!(opts.key_scan_limit(), DEFAULT_KEY_SCAN_LIMIT);
        assert_eq!(opts.report_format(), ReportFormat::Text);
    }

    #[test]
    fn computed_url_appends_resource_path() {
        let opts = RunOptions::builder()
            .base_url("http://localhost:8080/api/")
            .build()
            .unwrap();
        assert_eq!(
            opts.remote_schema_url(),
            format!("http://localhost:8080/api{SCHEMA_RESOURCE_PATH}")
        );
    }

    #[test]
    fn override_url_bypasses_base() {
        let opts = RunOptions::builder()
            .base_url("http://ignored.example")
            .schema_url("http://schemas.example/claim.json")
            .build()
            .unwrap();
        assert_eq!(opts.remote_schema_url(), "http://schemas.example/claim.json");
    }

    #[test]
    fn no_cache_clears_cache_path() {
        let opts = RunOptions::builder().no_cache().build().unwrap();
        assert_eq!(opts.cache(), &CachePolicy::Disabled);
        assert!(opts.cache_path().is_none());
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let opts = RunOptions::builder().fetch_timeout_secs(0).build().unwrap();
        assert!(opts.fetch_timeout().is_none());
    }

    #[test]
    fn invalid_base_url_rejected() {
        let err = RunOptions::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, OptionsError::InvalidUrl { field: "base URL", .. }));
    }

    #[test]
    fn invalid_override_url_rejected() {
        let err = RunOptions::builder().schema_url("::").build().unwrap_err();
        assert!(matches!(err, OptionsError::InvalidUrl { field: "schema URL", .. }));
    }

    #[test]
    fn zero_key_limit_rejected() {
        let err = RunOptions::builder().key_scan_limit(0).build().unwrap_err();
        assert!(matches!(err, OptionsError::ZeroKeyScanLimit));
    }
}
