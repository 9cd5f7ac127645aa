//! Schema provider error types.

/// Fatal errors while resolving a schema.
///
/// Soft failures (a corrupt cache, an unwritable cache) never surface
/// here; they are logged and resolution continues.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The configured local schema file does not exist.
    #[error("schema file not found: {path}")]
    SchemaNotFound { path: String },

    /// The configured local schema file exists but could not be read.
    #[error("cannot read schema file {path}: {source}")]
    SchemaUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// The local schema file is not valid JSON.
    #[error("schema file {path} is not valid JSON: {reason}")]
    InvalidSchemaDocument { path: String, reason: String },

    /// Network failure, non-success status, or a non-JSON response body.
    #[error("failed to fetch schema from {url}: {reason}")]
    SchemaFetchFailed { url: String, reason: String },

    /// Writing the cache file failed.
    #[error("cannot write schema cache {path}: {reason}")]
    CacheWrite { path: String, reason: String },

    /// Every strategy in the plan missed.
    #[error("no schema source produced a schema")]
    Exhausted,
}
