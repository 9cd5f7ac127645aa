//! # Pipeline Integration Tests
//!
//! Runs the full pipeline in-process with injected stdin/stdout against the
//! sample claim schema, served either from `schemas/claim.schema.json`
//! directly or from a wiremock endpoint standing in for the remote service.

use std::path::PathBuf;

use schemagate_cli::{run, ExitStatus, PipelineError, RunOutcome};
use schemagate_core::{KeyCase, ReportFormat, RunOptions};
use schemagate_provider::{ProviderError, SchemaOrigin};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALID_CLAIM: &str = r#"{"veteranId":"123456","claimDate":"2025-01-01","disabilities":[{"name":"Back pain","rating":50}]}"#;

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn claim_schema_path() -> PathBuf {
    repo_root().join("schemas/claim.schema.json")
}

fn claim_schema() -> Value {
    serde_json::from_str(&std::fs::read_to_string(claim_schema_path()).unwrap()).unwrap()
}

fn local_options() -> schemagate_core::options::RunOptionsBuilder {
    RunOptions::builder().schema_file(claim_schema_path())
}

async fn run_with_stdin(
    options: &RunOptions,
    payload: &str,
) -> (Result<RunOutcome, PipelineError>, String) {
    let mut out = Vec::new();
    let result = run(options, payload.as_bytes(), &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

async fn claim_server(expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/claim.schema.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(claim_schema()))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn valid_claim_passes() {
    let opts = local_options().build().unwrap();
    let (result, out) = run_with_stdin(&opts, VALID_CLAIM).await;
    let outcome = result.unwrap();

    assert_eq!(outcome.exit_status(), ExitStatus::Passed);
    assert!(out.contains("PASS"), "{out}");
    assert!(!out.contains("WARNING"), "{out}");
}

#[tokio::test]
async fn missing_veteran_id_fails_at_root() {
    let opts = local_options().build().unwrap();
    let (result, out) = run_with_stdin(&opts, r#"{"claimDate":"2025-01-01"}"#).await;
    let outcome = result.unwrap();

    assert_eq!(outcome.exit_status(), ExitStatus::ValidationFailed);
    assert_eq!(outcome.report.len(), 1);
    assert!(out.contains("FAIL: 1 violation(s)"), "{out}");
    assert!(out.contains("(root): "), "{out}");
    assert!(out.contains("veteranId"), "{out}");
}

#[tokio::test]
async fn rating_over_maximum_fails_with_path() {
    let opts = local_options().build().unwrap();
    let payload = VALID_CLAIM.replace("\"rating\":50", "\"rating\":150");
    let (result, out) = run_with_stdin(&opts, &payload).await;
    let outcome = result.unwrap();

    assert_eq!(outcome.exit_status(), ExitStatus::ValidationFailed);
    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.violations()[0].path, "disabilities[0].rating");
    assert!(out.contains("disabilities[0].rating: "), "{out}");
    assert!(out.contains("maximum"), "{out}");
}

#[tokio::test]
async fn malformed_payload_is_invalid_json() {
    let opts = local_options().build().unwrap();
    let (result, out) = run_with_stdin(&opts, r#"{"veteranId": "123", invalid}"#).await;
    let err = result.unwrap_err();

    assert!(matches!(err, PipelineError::InvalidPayloadJson { .. }), "got: {err}");
    assert_eq!(err.exit_status().code(), 2);
    assert!(out.is_empty(), "no report on payload errors: {out}");
}

#[tokio::test]
async fn missing_schema_file_is_fatal() {
    let opts = RunOptions::builder()
        .schema_file("missing.json")
        .build()
        .unwrap();
    let (result, _) = run_with_stdin(&opts, VALID_CLAIM).await;
    let err = result.unwrap_err();

    assert!(
        matches!(err, PipelineError::Schema(ProviderError::SchemaNotFound { .. })),
        "got: {err}"
    );
    assert_eq!(err.exit_status().code(), 3);
}

#[tokio::test]
async fn dash_key_warns_without_changing_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("open.schema.json");
    std::fs::write(&schema, r#"{"type": "object"}"#).unwrap();

    let opts = RunOptions::builder()
        .schema_file(&schema)
        .expect_case(KeyCase::Snake)
        .build()
        .unwrap();
    let (result, out) = run_with_stdin(&opts, r#"{"first-name":"A","firstName":"B"}"#).await;
    let outcome = result.unwrap();

    assert_eq!(outcome.key_case.detected, KeyCase::Dash);
    assert!(outcome.key_case.mismatch);
    assert_eq!(outcome.exit_status(), ExitStatus::Passed);
    assert!(
        out.contains("WARNING: key case mismatch: expected snake, detected dash"),
        "{out}"
    );
}

#[tokio::test]
async fn dash_warning_alongside_validation_failure_keeps_exit_1() {
    let opts = local_options().expect_case(KeyCase::Camel).build().unwrap();
    let (result, out) = run_with_stdin(&opts, r#"{"claim-date":"2025-01-01"}"#).await;
    let outcome = result.unwrap();

    assert_eq!(outcome.exit_status(), ExitStatus::ValidationFailed);
    assert!(out.contains("WARNING"), "{out}");
}

#[tokio::test]
async fn matching_case_has_no_warning() {
    let opts = local_options().expect_case(KeyCase::Camel).build().unwrap();
    let (result, out) = run_with_stdin(&opts, VALID_CLAIM).await;
    assert!(!result.unwrap().key_case.mismatch);
    assert!(!out.contains("WARNING"), "{out}");
}

#[tokio::test]
async fn payload_read_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("claim.json");
    std::fs::write(&payload, VALID_CLAIM).unwrap();

    let opts = local_options().payload_file(&payload).build().unwrap();
    let (result, _) = run_with_stdin(&opts, "ignored because a file is configured").await;
    assert_eq!(result.unwrap().exit_status(), ExitStatus::Passed);
}

#[tokio::test]
async fn schema_file_mode_makes_no_network_call() {
    let server = claim_server(0).await;
    let opts = local_options()
        .schema_url(format!("{}/claim.schema.json", server.uri()))
        .build()
        .unwrap();
    let (result, _) = run_with_stdin(&opts, VALID_CLAIM).await;
    let outcome = result.unwrap();
    assert!(matches!(outcome.origin, SchemaOrigin::LocalFile(_)));
}

#[tokio::test]
async fn cached_schema_gives_identical_results_without_refetch() {
    let server = claim_server(1).await;
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache/claim.schema.json");
    let opts = RunOptions::builder()
        .cache_path(&cache)
        .schema_url(format!("{}/claim.schema.json", server.uri()))
        .build()
        .unwrap();

    let payload = r#"{"claimDate":"bad","disabilities":[{"rating":150}]}"#;
    let (first, _) = run_with_stdin(&opts, payload).await;
    let (second, _) = run_with_stdin(&opts, payload).await;
    let (first, second) = (first.unwrap(), second.unwrap());

    assert!(matches!(first.origin, SchemaOrigin::Remote(_)));
    assert!(matches!(second.origin, SchemaOrigin::Cache(_)));
    assert_eq!(first.report, second.report);
    assert_eq!(first.exit_status(), ExitStatus::ValidationFailed);
}

#[tokio::test]
async fn corrupt_cache_falls_back_to_remote() {
    let server = claim_server(1).await;
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("claim.schema.json");
    std::fs::write(&cache, "not json at all").unwrap();

    let opts = RunOptions::builder()
        .cache_path(&cache)
        .schema_url(format!("{}/claim.schema.json", server.uri()))
        .build()
        .unwrap();
    let (result, _) = run_with_stdin(&opts, VALID_CLAIM).await;
    let outcome = result.unwrap();

    assert!(matches!(outcome.origin, SchemaOrigin::Remote(_)));
    assert_eq!(outcome.exit_status(), ExitStatus::Passed);
}

#[tokio::test]
async fn uncompilable_schema_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("broken.schema.json");
    std::fs::write(&schema, r#"{"type": 12}"#).unwrap();

    let opts = RunOptions::builder().schema_file(&schema).build().unwrap();
    let (result, _) = run_with_stdin(&opts, "{}").await;
    let err = result.unwrap_err();

    assert!(matches!(err, PipelineError::Compile(_)), "got: {err}");
    assert_eq!(err.exit_status(), ExitStatus::Fatal);
}

#[tokio::test]
async fn json_report_format() {
    let opts = local_options()
        .report_format(ReportFormat::Json)
        .build()
        .unwrap();
    let (result, out) = run_with_stdin(&opts, r#"{"claimDate":"2025-01-01"}"#).await;
    result.unwrap();

    let doc: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["valid"], Value::Bool(false));
    assert_eq!(doc["violations"][0]["path"], Value::String(String::new()));
    assert_eq!(doc["violations"][0]["params"]["property"], "veteranId");
}
