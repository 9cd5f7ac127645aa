//! # Resolver Strategies
//!
//! One [`SchemaSource`] per place a schema can come from. Each strategy
//! resolves independently and reports a tagged [`Resolution`]; fatal
//! conditions are returned as [`ProviderError`] instead.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use crate::error::ProviderError;
use crate::{cache, remote};

/// Where a loaded schema came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOrigin {
    LocalFile(PathBuf),
    Cache(PathBuf),
    Remote(String),
}

impl fmt::Display for SchemaOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalFile(path) => write!(f, "file {}", path.display()),
            Self::Cache(path) => write!(f, "cache {}", path.display()),
            Self::Remote(url) => write!(f, "remote {url}"),
        }
    }
}

/// A schema document together with its origin.
///
/// The document is never mutated after loading; the same value is handed
/// to the validation engine for compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSchema {
    document: Value,
    origin: SchemaOrigin,
}

impl LoadedSchema {
    pub fn new(document: Value, origin: SchemaOrigin) -> Self {
        Self { document, origin }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn origin(&self) -> &SchemaOrigin {
        &self.origin
    }

    pub fn into_document(self) -> Value {
        self.document
    }
}

/// Non-fatal outcome of one strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The strategy produced a schema; resolution stops.
    Found(LoadedSchema),
    /// Nothing to load here; try the next strategy.
    Miss,
    /// Something was there but unusable; try the next strategy.
    SoftFailure(String),
}

/// A single resolver strategy in the provider's plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Explicit local schema file. Missing or unparsable is fatal.
    LocalFile(PathBuf),
    /// On-disk cache. Missing is a miss, corrupt is a soft failure.
    Cache(PathBuf),
    /// Remote endpoint, optionally populating a cache file on success.
    Remote {
        url: String,
        cache: Option<PathBuf>,
        timeout: Option<Duration>,
    },
}

impl SchemaSource {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LocalFile(_) => "local-file",
            Self::Cache(_) => "cache",
            Self::Remote { .. } => "remote",
        }
    }

    /// Run this strategy.
    ///
    /// # Errors
    ///
    /// Local file: [`ProviderError::SchemaNotFound`],
    /// [`ProviderError::SchemaUnreadable`] or
    /// [`ProviderError::InvalidSchemaDocument`]. Remote:
    /// [`ProviderError::SchemaFetchFailed`]. The cache strategy never fails.
    pub async fn resolve(&self) -> Result<Resolution, ProviderError> {
        match self {
            Self::LocalFile(path) => load_local(path).await.map(Resolution::Found),
            Self::Cache(path) => Ok(cache::read_cache(path).await),
            Self::Remote {
                url,
                cache: cache_path,
                timeout,
            } => {
                let document = remote::fetch_schema(url, *timeout).await?;
                if let Some(cache_path) = cache_path {
                    if let Err(e) = cache::write_cache(cache_path, &document).await {
                        tracing::warn!("{e}; continuing with the fetched schema");
                    }
                }
                Ok(Resolution::Found(LoadedSchema::new(
                    document,
                    SchemaOrigin::Remote(url.clone()),
                )))
            }
        }
    }
}

async fn load_local(path: &Path) -> Result<LoadedSchema, ProviderError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ProviderError::SchemaNotFound {
                path: path.display().to_string(),
            }
        } else {
            ProviderError::SchemaUnreadable {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let document: Value =
        serde_json::from_str(&content).map_err(|e| ProviderError::InvalidSchemaDocument {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    tracing::debug!(path = %path.display(), "loaded local schema file");
    Ok(LoadedSchema::new(document, SchemaOrigin::LocalFile(path.to_path_buf())))
}
