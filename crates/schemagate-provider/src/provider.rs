//! # Schema Provider
//!
//! Builds the resolution plan from [`RunOptions`] and walks it.
//!
//! | Configuration | Plan |
//! |---|---|
//! | `schema_file` set | `LocalFile` |
//! | caching enabled | `Cache`, `Remote` (writes cache) |
//! | caching disabled | `Remote` |

use schemagate_core::RunOptions;

use crate::error::ProviderError;
use crate::source::{LoadedSchema, Resolution, SchemaSource};

/// Ordered chain of schema resolver strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaProvider {
    plan: Vec<SchemaSource>,
}

impl SchemaProvider {
    /// Derive the plan from run options.
    pub fn from_options(options: &RunOptions) -> Self {
        if let Some(path) = options.schema_file() {
            return Self::with_plan(vec![SchemaSource::LocalFile(path.to_path_buf())]);
        }

        let cache = options.cache_path().map(|p| p.to_path_buf());
        let mut plan = Vec::with_capacity(2);
        if let Some(path) = &cache {
            plan.push(SchemaSource::Cache(path.clone()));
        }
        plan.push(SchemaSource::Remote {
            url: options.remote_schema_url(),
            cache,
            timeout: options.fetch_timeout(),
        });
        Self::with_plan(plan)
    }

    /// Use an explicit plan.
    pub fn with_plan(plan: Vec<SchemaSource>) -> Self {
        Self { plan }
    }

    /// Strategies in evaluation order.
    pub fn plan(&self) -> &[SchemaSource] {
        &self.plan
    }

    /// Evaluate the plan until a strategy finds a schema.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal [`ProviderError`] from a strategy, or
    /// [`ProviderError::Exhausted`] if every strategy missed.
    pub async fn resolve(&self) -> Result<LoadedSchema, ProviderError> {
        for source in &self.plan {
            tracing::debug!(source = source.kind(), "resolving schema");
            match source.resolve().await? {
                Resolution::Found(schema) => {
                    tracing::info!(origin = %schema.origin(), "schema resolved");
                    return Ok(schema);
                }
                Resolution::Miss => {}
                Resolution::SoftFailure(reason) => {
                    tracing::debug!(source = source.kind(), %reason, "falling through");
                }
            }
        }
        Err(ProviderError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn schema_file_plan_is_exclusive() {
        let opts = RunOptions::builder()
            .schema_file("local.json")
            .cache_path("cache.json")
            .schema_url("http://example.com/s.json")
            .build()
            .unwrap();
        let provider = SchemaProvider::from_options(&opts);
        assert_eq!(
            provider.plan(),
            &[SchemaSource::LocalFile(PathBuf::from("local.json"))]
        );
    }

    #[test]
    fn cached_plan_checks_cache_then_remote() {
        let opts = RunOptions::builder()
            .cache_path("c/schema.json")
            .base_url("http://example.com/")
            .fetch_timeout_secs(5)
            .build()
            .unwrap();
        let provider = SchemaProvider::from_options(&opts);
        assert_eq!(
            provider.plan(),
            &[
                SchemaSource::Cache(PathBuf::from("c/schema.json")),
                SchemaSource::Remote {
                    url: opts.remote_schema_url(),
                    cache: Some(PathBuf::from("c/schema.json")),
                    timeout: Some(Duration::from_secs(5)),
                },
            ]
        );
    }

    #[test]
    fn uncached_plan_is_remote_only() {
        let opts = RunOptions::builder().no_cache().build().unwrap();
        let provider = SchemaProvider::from_options(&opts);
        assert!(matches!(
            provider.plan(),
            [SchemaSource::Remote { cache: None, .. }]
        ));
    }

    #[tokio::test]
    async fn empty_plan_is_exhausted() {
        let err = SchemaProvider::with_plan(Vec::new()).resolve().await.unwrap_err();
        assert!(matches!(err, ProviderError::Exhausted));
    }

    #[tokio::test]
    async fn misses_fall_through_to_later_sources() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("schema.json");
        std::fs::write(&local, "{}").unwrap();

        let provider = SchemaProvider::with_plan(vec![
            SchemaSource::Cache(dir.path().join("absent.json")),
            SchemaSource::LocalFile(local.clone()),
        ]);
        let loaded = provider.resolve().await.unwrap();
        assert_eq!(
            loaded.origin(),
            &crate::SchemaOrigin::LocalFile(local)
        );
    }
}
