//! # schemagate-provider: Schema Acquisition
//!
//! Resolves the JSON Schema document for a run from one of three places,
//! in strict precedence:
//!
//! 1. **Local file** (`--schema-file`). Exclusive: when configured, the
//!    schema comes from that file or the run fails. The cache and the
//!    network are never touched, so this mode is safe for air-gapped use.
//! 2. **Cache** (`--schema-cache`, unless `--no-cache`). A present and
//!    parseable cache file wins. A corrupt cache is a miss, not an error.
//! 3. **Remote** (`--schema-url`, or `--base-url` plus the fixed resource
//!    path). A failed fetch is fatal. A successful fetch is written to the
//!    cache when caching is enabled.
//!
//! ## Design
//!
//! [`SchemaProvider`] holds an explicit ordered plan of [`SchemaSource`]
//! strategies derived from [`RunOptions`](schemagate_core::RunOptions).
//! Each strategy yields a tagged [`Resolution`] (`Found`, `Miss`,
//! `SoftFailure`) or a fatal [`ProviderError`]; the provider walks the plan
//! until something is found.
//!
//! No retries are attempted anywhere.

pub mod cache;
pub mod error;
pub mod provider;
pub mod remote;
pub mod source;

pub use error::ProviderError;
pub use provider::SchemaProvider;
pub use source::{LoadedSchema, Resolution, SchemaOrigin, SchemaSource};
