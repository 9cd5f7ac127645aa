//! # schemagate-schema: Validation Engine & Key-Case Heuristic
//!
//! The analysis half of the pipeline. Given a schema document and a payload
//! (both plain `serde_json::Value`s), this crate answers two questions:
//!
//! - **Does the payload conform?** The [`validate`] module compiles the
//!   schema with the `jsonschema` crate and reports every violation in a
//!   single pass, each located by a structural path such as
//!   `disabilities[0].rating`.
//!
//! - **What naming convention do the keys follow?** The [`keycase`] module
//!   scans object keys depth-first (bounded by a key cap) and classifies
//!   them as `dash`, `snake`, `camel` or `unknown`.
//!
//! Neither module performs I/O. Schema acquisition lives in
//! `schemagate-provider`.

pub mod keycase;
pub mod validate;

pub use keycase::{classify, KeyCaseDetector};
pub use validate::{
    validate_document, EngineError, EngineOptions, ErrorMode, ValidationEngine, ValidationReport,
    Violation,
};
