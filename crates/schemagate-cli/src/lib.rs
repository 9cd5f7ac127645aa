//! # schemagate-cli: Payload Validation CLI
//!
//! Thin orchestration over the library crates. One invocation:
//!
//! 1. parses arguments into an immutable [`RunOptions`](schemagate_core::RunOptions),
//! 2. reads and parses the payload (file or stdin),
//! 3. resolves the schema (local file, cache, or remote),
//! 4. validates the payload and scans its key case,
//! 5. prints the report and exits with a status code.
//!
//! ```bash
//! schemagate --json claim.json --schema-file schemas/claim.schema.json
//! cat claim.json | schemagate --expect-case camel
//! schemagate --json claim.json --no-cache --schema-url https://example.org/claim.json
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |---|---|
//! | 0 | payload conforms |
//! | 1 | one or more schema violations |
//! | 2 | payload missing or not valid JSON |
//! | 3 | any other fatal error |
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the pipeline; the pipeline takes
//!   `&RunOptions` plus injected stdin/stdout so it can be driven by tests.
//! - Logging goes to stderr; stdout carries only the report.

pub mod args;
pub mod pipeline;
pub mod report;

pub use args::Cli;
pub use pipeline::{run, ExitStatus, KeyCaseCheck, PipelineError, RunOutcome};
