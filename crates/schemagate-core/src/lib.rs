//! # schemagate-core: Foundational Types
//!
//! Leaf crate of the workspace. Defines the configuration object that every
//! other crate consumes and the small vocabulary types shared between the
//! schema engine and the CLI.
//!
//! ## Key Types
//!
//! - [`RunOptions`]: immutable configuration resolved once at startup and
//!   passed by reference into the schema provider and the pipeline. There
//!   is no process-global configuration anywhere in the workspace.
//!
//! - [`KeyCase`]: the four-way verdict of the key-naming heuristic
//!   (`camel`, `snake`, `dash`, `unknown`).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `schemagate-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod case;
pub mod error;
pub mod options;

pub use case::KeyCase;
pub use error::OptionsError;
pub use options::{
    CachePolicy, PayloadSource, ReportFormat, RunOptions, DEFAULT_BASE_URL, DEFAULT_CACHE_PATH,
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_KEY_SCAN_LIMIT, SCHEMA_RESOURCE_PATH,
};
