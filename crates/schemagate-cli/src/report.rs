//! # Report Rendering
//!
//! Text layout:
//!
//! ```text
//! schemagate validation report
//! schema: remote https://...
//! WARNING: key case mismatch: expected snake, detected dash
//! FAIL: 1 violation(s)
//!   - disabilities[0].rating: 150 is greater than the maximum of 100 {"limit":100}
//! ```
//!
//! The JSON layout carries the same information as one document.

use std::io::Write;

use schemagate_core::ReportFormat;
use schemagate_schema::Violation;
use serde::Serialize;

use crate::pipeline::{KeyCaseCheck, PipelineError, RunOutcome};

#[derive(Serialize)]
struct JsonReport<'a> {
    schema: String,
    valid: bool,
    violations: &'a [Violation],
    key_case: &'a KeyCaseCheck,
}

/// Write `outcome` to `out` in the requested format.
pub fn render<W: Write>(
    outcome: &RunOutcome,
    format: ReportFormat,
    out: &mut W,
) -> Result<(), PipelineError> {
    match format {
        ReportFormat::Text => render_text(outcome, out)?,
        ReportFormat::Json => render_json(outcome, out)?,
    }
    out.flush()?;
    Ok(())
}

fn render_text<W: Write>(outcome: &RunOutcome, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "schemagate validation report")?;
    writeln!(out, "schema: {}", outcome.origin)?;

    let case = &outcome.key_case;
    if case.mismatch {
        writeln!(
            out,
            "WARNING: key case mismatch: expected {}, detected {}",
            case.expected, case.detected
        )?;
    }

    let report = &outcome.report;
    if report.is_valid() {
        writeln!(out, "PASS")?;
    } else {
        writeln!(out, "FAIL: {} violation(s)", report.len())?;
        for violation in report.violations() {
            writeln!(out, "  - {violation}")?;
        }
    }
    Ok(())
}

fn render_json<W: Write>(outcome: &RunOutcome, out: &mut W) -> Result<(), PipelineError> {
    let doc = JsonReport {
        schema: outcome.origin.to_string(),
        valid: outcome.report.is_valid(),
        violations: outcome.report.violations(),
        key_case: &outcome.key_case,
    };
    serde_json::to_writer_pretty(&mut *out, &doc).map_err(PipelineError::Render)?;
    writeln!(out)?;
    Ok(())
}
