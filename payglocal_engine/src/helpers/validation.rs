//! Request payload checks, applied before any cryptography happens.
//!
//! The gateway does the real validation. These rules only catch the mistakes that would otherwise cost a round trip:
//! missing fields and obviously wrong operation types.
use std::fmt::Display;

use log::*;
use serde_json::Value;
use thiserror::Error;

use crate::helpers::lookup_path;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The payload must be a JSON object")]
    NotAnObject,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Invalid value for {path}: {found}. Expected one of: {}", .expected.join(", "))]
    InvalidValue { path: String, found: String, expected: Vec<String> },
}

/// The value at `path` must be one of `allowed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTypeRule {
    pub path: String,
    pub allowed: Vec<String>,
}

/// When the value at `path` equals `equals`, the fields in `required` must also be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRule {
    pub path: String,
    pub equals: String,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRules {
    pub required: Vec<String>,
    pub operation_type: Option<OperationTypeRule>,
    pub conditional: Option<ConditionalRule>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require<S: Display>(mut self, paths: &[S]) -> Self {
        self.required.extend(paths.iter().map(|p| p.to_string()));
        self
    }

    pub fn with_operation_type<S: Display>(mut self, path: &str, allowed: &[S]) -> Self {
        let allowed = allowed.iter().map(|a| a.to_string()).collect();
        self.operation_type = Some(OperationTypeRule { path: path.to_string(), allowed });
        self
    }

    pub fn with_conditional<S: Display>(mut self, path: &str, equals: &str, required: &[S]) -> Self {
        let required = required.iter().map(|r| r.to_string()).collect();
        self.conditional = Some(ConditionalRule { path: path.to_string(), equals: equals.to_string(), required });
        self
    }
}

/// Apply `rules` to `payload`. Checks run in order: required fields, operation type, conditional fields. The first
/// failing check is reported.
pub fn validate_payload(payload: &Value, rules: &ValidationRules) -> Result<(), ValidationError> {
    if !payload.is_object() {
        return Err(ValidationError::NotAnObject);
    }
    check_required(payload, &rules.required)?;
    if let Some(rule) = &rules.operation_type {
        let found = lookup_path(payload, &rule.path).map(value_as_text);
        match found {
            Some(v) if rule.allowed.contains(&v) => {},
            other => {
                return Err(ValidationError::InvalidValue {
                    path: rule.path.clone(),
                    found: other.unwrap_or_else(|| "undefined".to_string()),
                    expected: rule.allowed.clone(),
                });
            },
        }
    }
    if let Some(rule) = &rules.conditional {
        let triggered = lookup_path(payload, &rule.path).map(value_as_text).is_some_and(|v| v == rule.equals);
        if triggered {
            trace!("🧾️ {} is {}, checking conditional fields", rule.path, rule.equals);
            check_required(payload, &rule.required)?;
        }
    }
    debug!("🧾️ Validation passed");
    Ok(())
}

fn check_required(payload: &Value, required: &[String]) -> Result<(), ValidationError> {
    let missing = required
        .iter()
        .filter(|path| !lookup_path(payload, path).is_some_and(is_present))
        .cloned()
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
