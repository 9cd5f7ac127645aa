//! # Schema Cache
//!
//! A single JSON file mirroring the most recently fetched remote schema.
//! Reads never fail the run: an absent file is a miss and an unreadable or
//! unparsable file is a soft failure. Writes create missing parent
//! directories and store the schema pretty-printed.
//!
//! No locking is performed; concurrent runs sharing a cache path are not
//! supported.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::ProviderError;
use crate::source::{LoadedSchema, Resolution, SchemaOrigin};

/// Try to load the cached schema at `path`.
pub async fn read_cache(path: &Path) -> Resolution {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "schema cache miss");
            return Resolution::Miss;
        }
        Err(e) => {
            return soft_failure(path, format!("unreadable: {e}"));
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(document) => {
            tracing::debug!(path = %path.display(), "schema cache hit");
            Resolution::Found(LoadedSchema::new(
                document,
                SchemaOrigin::Cache(path.to_path_buf()),
            ))
        }
        Err(e) => soft_failure(path, format!("corrupt: {e}")),
    }
}

fn soft_failure(path: &Path, reason: String) -> Resolution {
    tracing::warn!(path = %path.display(), "ignoring schema cache: {reason}");
    Resolution::SoftFailure(format!("cache {} {reason}", path.display()))
}

/// Write `schema` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ProviderError::CacheWrite`] if a directory cannot be created
/// or the file cannot be written.
pub async fn write_cache(path: &Path, schema: &Value) -> Result<(), ProviderError> {
    let cache_err = |reason: String| ProviderError::CacheWrite {
        path: path.display().to_string(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| cache_err(format!("cannot create {}: {e}", parent.display())))?;
    }

    let mut rendered = serde_json::to_string_pretty(schema).map_err(|e| cache_err(e.to_string()))?;
    rendered.push('\n');

    tokio::fs::write(path, rendered)
        .await
        .map_err(|e| cache_err(e.to_string()))?;

    tracing::info!(path = %path.display(), "wrote schema cache");
    Ok(())
}
