//! # Remote Schema Fetch
//!
//! A single HTTP GET for the schema document. Transport errors, timeouts,
//! non-2xx responses and non-JSON bodies all map to
//! [`ProviderError::SchemaFetchFailed`]. There is no retry.

use std::time::Duration;

use serde_json::Value;

use crate::error::ProviderError;

/// Longest response body excerpt carried into error messages.
const BODY_EXCERPT_LEN: usize = 200;

/// Fetch and parse the schema at `url`.
///
/// `timeout` bounds the whole request; `None` waits indefinitely.
pub async fn fetch_schema(url: &str, timeout: Option<Duration>) -> Result<Value, ProviderError> {
    let fetch_err = |reason: String| ProviderError::SchemaFetchFailed {
        url: url.to_string(),
        reason,
    };

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder
        .build()
        .map_err(|e| fetch_err(format!("failed to build HTTP client: {e}")))?;

    tracing::info!(%url, ?timeout, "fetching remote schema");

    let resp = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                fetch_err(format!("timed out: {e}"))
            } else {
                fetch_err(e.to_string())
            }
        })?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
        return Err(fetch_err(format!("HTTP {status}: {excerpt}")));
    }

    let document: Value = resp.json().await.map_err(|e| {
        if e.is_decode() {
            fetch_err(format!("response is not valid JSON: {e}"))
        } else {
            fetch_err(format!("failed to read response body: {e}"))
        }
    })?;

    tracing::debug!(%url, "fetched remote schema");
    Ok(document)
}
