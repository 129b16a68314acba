use super::{DataRow, InsertDataset};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use utoipa::ToSchema;

/// What a table looks like before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateDataset {
    pub file_name: String,
    pub headers: Vec<String>,
    pub data: Vec<DataRow>,
}

/// One broken invariant, located by a path such as `headers[2]` or `data[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every invariant a candidate dataset broke, in field order.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid data format: {}", summarize(.field_errors))]
pub struct ValidationError {
    pub field_errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks the dataset invariants and produces the insertable form.
///
/// All violations are reported, not only the first one.
pub fn validate(candidate: CandidateDataset) -> Result<InsertDataset, ValidationError> {
    let mut errors = Vec::new();

    if candidate.file_name.trim().is_empty() {
        errors.push(FieldError::new("fileName", "must not be empty"));
    }

    if candidate.headers.is_empty() {
        errors.push(FieldError::new("headers", "must contain at least one header"));
    }
    let mut seen = HashSet::new();
    for (i, header) in candidate.headers.iter().enumerate() {
        if header.trim().is_empty() {
            errors.push(FieldError::new(format!("headers[{}]", i), "must not be blank"));
        } else if !seen.insert(header.as_str()) {
            errors.push(FieldError::new(
                format!("headers[{}]", i),
                format!("duplicate header '{}'", header),
            ));
        }
    }

    if candidate.data.is_empty() {
        errors.push(FieldError::new("data", "must contain at least one row"));
    }
    let known: HashSet<&str> = candidate.headers.iter().map(String::as_str).collect();
    for (i, row) in candidate.data.iter().enumerate() {
        let unknown: Vec<&str> = row
            .keys()
            .map(String::as_str)
            .filter(|key| !known.contains(key))
            .collect();
        if !unknown.is_empty() {
            errors.push(FieldError::new(
                format!("data[{}]", i),
                format!("unknown columns: {}", unknown.join(", ")),
            ));
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError {
            field_errors: errors,
        });
    }

    Ok(InsertDataset::new(
        candidate.file_name,
        candidate.headers,
        candidate.data,
    ))
}
