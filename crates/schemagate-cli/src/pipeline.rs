//! # Validation Pipeline
//!
//! Runs one invocation end to end: payload, schema, validation, key-case
//! check, report. Fatal conditions come back as [`PipelineError`], each of
//! which knows its exit status; a schema violation is not an error but a
//! normal [`RunOutcome`] with [`ExitStatus::ValidationFailed`].

use std::io::{Read, Write};

use schemagate_core::{KeyCase, PayloadSource, RunOptions};
use schemagate_provider::{ProviderError, SchemaOrigin, SchemaProvider};
use schemagate_schema::{EngineError, EngineOptions, KeyCaseDetector, ValidationEngine, ValidationReport};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::report;

/// Process exit status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Payload conforms to the schema.
    Passed,
    /// One or more schema violations.
    ValidationFailed,
    /// Payload missing or not valid JSON.
    InvalidPayload,
    /// Any other fatal error.
    Fatal,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::ValidationFailed => 1,
            Self::InvalidPayload => 2,
            Self::Fatal => 3,
        }
    }
}

/// Fatal pipeline errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The payload file is missing or the input stream could not be read.
    #[error("cannot read payload from {source_name}: {source}")]
    PayloadUnreadable {
        source_name: String,
        source: std::io::Error,
    },

    /// The payload text is not valid JSON.
    #[error("payload from {source_name} is not valid JSON: {source}")]
    InvalidPayloadJson {
        source_name: String,
        source: serde_json::Error,
    },

    /// The schema could not be obtained.
    #[error(transparent)]
    Schema(#[from] ProviderError),

    /// The schema could not be compiled.
    #[error(transparent)]
    Compile(#[from] EngineError),

    /// Writing the report failed.
    #[error("cannot write report: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing the JSON report failed.
    #[error("cannot render JSON report: {0}")]
    Render(#[source] serde_json::Error),
}

impl PipelineError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::PayloadUnreadable { .. } | Self::InvalidPayloadJson { .. } => {
                ExitStatus::InvalidPayload
            }
            _ => ExitStatus::Fatal,
        }
    }
}

/// Result of the key-naming heuristic for one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyCaseCheck {
    pub detected: KeyCase,
    pub expected: KeyCase,
    pub mismatch: bool,
}

impl KeyCaseCheck {
    fn new(detected: KeyCase, expected: KeyCase) -> Self {
        Self {
            detected,
            expected,
            mismatch: expected.mismatches(detected),
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub origin: SchemaOrigin,
    pub report: ValidationReport,
    pub key_case: KeyCaseCheck,
}

impl RunOutcome {
    /// Exit status, determined by the validation outcome only.
    pub fn exit_status(&self) -> ExitStatus {
        if self.report.is_valid() {
            ExitStatus::Passed
        } else {
            ExitStatus::ValidationFailed
        }
    }
}

/// Execute one validation run.
///
/// `stdin` is consumed only when the payload source is standard input.
/// The report is written to `out` in the configured format.
///
/// # Errors
///
/// See [`PipelineError`]; use [`PipelineError::exit_status`] to map an
/// error to its exit code.
pub async fn run<R, W>(options: &RunOptions, stdin: R, out: &mut W) -> Result<RunOutcome, PipelineError>
where
    R: Read,
    W: Write,
{
    let payload = read_payload(options.payload(), stdin)?;

    let schema = SchemaProvider::from_options(options).resolve().await?;
    let origin = schema.origin().clone();
    let engine = ValidationEngine::compile(&schema.into_document(), EngineOptions::default())?;
    let report = engine.validate(&payload);

    let detected = KeyCaseDetector::new(options.key_scan_limit()).detect(&payload);
    let key_case = KeyCaseCheck::new(detected, options.expect_case());
    // The report carries the user-facing warning line.
    if key_case.mismatch {
        tracing::info!(
            expected = %key_case.expected,
            detected = %key_case.detected,
            "payload key case differs from expectation"
        );
    }

    let outcome = RunOutcome {
        origin,
        report,
        key_case,
    };
    report::render(&outcome, options.report_format(), out)?;

    tracing::info!(
        valid = outcome.report.is_valid(),
        violations = outcome.report.len(),
        "validation complete"
    );
    Ok(outcome)
}

fn read_payload<R: Read>(source: &PayloadSource, mut stdin: R) -> Result<Value, PipelineError> {
    let (source_name, text) = match source {
        PayloadSource::Stdin => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .map_err(|e| PipelineError::PayloadUnreadable {
                    source_name: "stdin".to_string(),
                    source: e,
                })?;
            ("stdin".to_string(), text)
        }
        PayloadSource::File(path) => {
            let name = path.display().to_string();
            let text = std::fs::read_to_string(path).map_err(|e| PipelineError::PayloadUnreadable {
                source_name: name.clone(),
                source: e,
            })?;
            (name, text)
        }
    };

    serde_json::from_str(&text).map_err(|e| PipelineError::InvalidPayloadJson { source_name, source: e })
}
