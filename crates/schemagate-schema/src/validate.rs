//! # Validation Engine
//!
//! Compiles a JSON Schema once and evaluates payloads against it, reporting
//! violations with enough structure to locate and explain each one.
//!
//! ## Error Mode
//!
//! The engine's contract depends on [`ErrorMode`]. In
//! [`ErrorMode::CollectAll`] (the default) every independent violation in
//! the document is reported in one pass; in [`ErrorMode::FirstOnly`] the
//! report stops after the first. Violations appear in the order the
//! underlying validator discovers them, which is deterministic for a given
//! schema and payload.
//!
//! ## Formats
//!
//! String `format` keywords (`date`, `email`, `uri`, ...) are asserted when
//! [`EngineOptions::validate_formats`] is set, regardless of draft.
//!
//! ## Paths
//!
//! The validator reports RFC 6901 pointers (`/disabilities/0/rating`). Each
//! [`Violation`] carries that pointer plus a structural path
//! (`disabilities[0].rating`) computed by walking the payload, so array
//! indices and numeric-looking object keys are told apart.

use std::collections::BTreeMap;
use std::fmt;

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::{ValidationError, Validator};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error raised before any payload is evaluated.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The schema document is not a valid schema for the validator.
    #[error("schema compilation failed: {reason}")]
    Compile {
        /// Validator diagnostic.
        reason: String,
    },
}

/// How many violations a single evaluation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Report every violation in the document.
    #[default]
    CollectAll,
    /// Stop at the first violation.
    FirstOnly,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub error_mode: ErrorMode,
    /// Assert `format` keywords instead of treating them as annotations.
    pub validate_formats: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::CollectAll,
            validate_formats: true,
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Structural path to the offending node; empty at the document root.
    pub path: String,
    /// JSON Pointer to the offending node as reported by the validator.
    pub pointer: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// Parameters of the violated constraint (limits, allowed values, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, Value>>,
}

impl Violation {
    /// The path as shown to users: `(root)` for the document root.
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.display_path(), self.message)?;
        if let Some(params) = &self.params {
            // BTreeMap keeps parameter order stable across runs.
            let rendered = serde_json::to_string(params).map_err(|_| fmt::Error)?;
            write!(f, " {rendered}")?;
        }
        Ok(())
    }
}

/// Outcome of evaluating one payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    valid: bool,
    violations: Vec<Violation>,
}

impl ValidationReport {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// True when the payload conforms to the schema.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Violations in discovery order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

/// A compiled schema ready to evaluate payloads.
pub struct ValidationEngine {
    validator: Validator,
    options: EngineOptions,
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ValidationEngine {
    /// Compile `schema` with the given options.
    ///
    /// The draft is taken from the schema's `$schema` keyword, falling back
    /// to the validator's default draft when absent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compile`] if the document is not a valid schema.
    pub fn compile(schema: &Value, options: EngineOptions) -> Result<Self, EngineError> {
        let mut opts = jsonschema::options();
        opts.should_validate_formats(options.validate_formats);

        let validator = opts.build(schema).map_err(|e| EngineError::Compile {
            reason: e.to_string(),
        })?;

        tracing::debug!(?options, "compiled schema");
        Ok(Self { validator, options })
    }

    /// Engine configuration.
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Evaluate `instance` against the compiled schema.
    pub fn validate(&self, instance: &Value) -> ValidationReport {
        let errors = self.validator.iter_errors(instance);
        let limit = match self.options.error_mode {
            ErrorMode::CollectAll => usize::MAX,
            ErrorMode::FirstOnly => 1,
        };

        let violations: Vec<Violation> = errors
            .take(limit)
            .map(|e| to_violation(&e, instance))
            .collect();

        tracing::debug!(violations = violations.len(), "evaluated payload");
        ValidationReport::from_violations(violations)
    }
}

/// Compile `schema` with default options and evaluate `instance`.
///
/// # Errors
///
/// Returns [`EngineError::Compile`] if the schema does not compile.
pub fn validate_document(schema: &Value, instance: &Value) -> Result<ValidationReport, EngineError> {
    let engine = ValidationEngine::compile(schema, EngineOptions::default())?;
    Ok(engine.validate(instance))
}

fn to_violation(error: &ValidationError<'_>, instance: &Value) -> Violation {
    let pointer = error.instance_path.to_string();
    Violation {
        path: structural_path(&pointer, instance),
        pointer,
        message: error.to_string(),
        params: constraint_params(&error.kind),
    }
}

/// Extract the parameters of the violated constraint, if the kind has any.
fn constraint_params(kind: &ValidationErrorKind) -> Option<BTreeMap<String, Value>> {
    let (name, value) = match kind {
        ValidationErrorKind::Required { property } => ("property", property.clone()),
        ValidationErrorKind::Maximum { limit }
        | ValidationErrorKind::Minimum { limit }
        | ValidationErrorKind::ExclusiveMaximum { limit }
        | ValidationErrorKind::ExclusiveMinimum { limit } => ("limit", limit.clone()),
        ValidationErrorKind::MaxLength { limit }
        | ValidationErrorKind::MinLength { limit }
        | ValidationErrorKind::MaxItems { limit }
        | ValidationErrorKind::MinItems { limit }
        | ValidationErrorKind::MaxProperties { limit }
        | ValidationErrorKind::MinProperties { limit } => ("limit", Value::from(*limit)),
        ValidationErrorKind::MultipleOf { multiple_of } => ("multipleOf", Value::from(*multiple_of)),
        ValidationErrorKind::Enum { options } => ("allowed", options.clone()),
        ValidationErrorKind::Constant { expected_value } => ("expected", expected_value.clone()),
        ValidationErrorKind::Pattern { pattern } => ("pattern", Value::from(pattern.as_str())),
        ValidationErrorKind::Format { format } => ("format", Value::from(format.as_str())),
        ValidationErrorKind::Type { kind } => ("expected", type_names(kind)),
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            "unexpected",
            Value::from(unexpected.iter().map(String::as_str).collect::<Vec<_>>()),
        ),
        _ => return None,
    };
    Some(BTreeMap::from([(name.to_string(), value)]))
}

fn type_names(kind: &TypeKind) -> Value {
    match kind {
        TypeKind::Single(ty) => Value::from(ty.to_string()),
        TypeKind::Multiple(types) => (*types)
            .into_iter()
            .map(|ty| Value::from(ty.to_string()))
            .collect(),
    }
}

/// Convert a JSON Pointer into a structural path, resolving each segment
/// against `instance` so array indices render as `[n]` and object keys as
/// `.key`. Segments that cannot be resolved fall back to their textual form.
fn structural_path(pointer: &str, instance: &Value) -> String {
    let mut path = String::new();
    let mut node = Some(instance);

    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        let index = match node {
            Some(Value::Array(_)) => segment.parse::<usize>().ok(),
            Some(Value::Object(_)) => None,
            // Unresolvable: treat digit-only segments as indices.
            _ => segment.parse::<usize>().ok(),
        };

        match index {
            Some(i) => {
                path.push_str(&format!("[{i}]"));
                node = node.and_then(|n| n.get(i));
            }
            None => {
                push_key(&mut path, &segment);
                node = node.and_then(|n| n.get(segment.as_str()));
            }
        }
    }

    path
}

fn push_key(path: &mut String, key: &str) {
    let plain = !key.is_empty()
        && !key.contains(['.', '[', ']', '"'])
        && !key.bytes().all(|b| b.is_ascii_digit());
    if plain {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(key);
    } else {
        // Quote keys that would read as an index or break the dotted form.
        path.push_str(&format!("[{}]", Value::from(key)));
    }
}
