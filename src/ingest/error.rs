use crate::datamodel::{FieldError, ValidationError};
use crate::importers::ParseError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Tag of an ingestion failure, as seen by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ErrorKind {
    UnsupportedFormat,
    MalformedRow,
    EmptyDataset,
    SchemaViolation,
    InternalFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Problem detail attached to a rejected upload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorDetail {
    Row {
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<u64>,
        message: String,
    },
    Field(FieldError),
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to store dataset: {0}")]
    Storage(anyhow::Error),
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::Parse(ParseError::UnsupportedFormat { .. }) => ErrorKind::UnsupportedFormat,
            IngestError::Parse(ParseError::MalformedRow { .. }) => ErrorKind::MalformedRow,
            IngestError::Parse(ParseError::EmptyDataset) => ErrorKind::EmptyDataset,
            IngestError::Parse(ParseError::Spreadsheet(_)) => ErrorKind::InternalFailure,
            IngestError::Validation(_) => ErrorKind::SchemaViolation,
            IngestError::Storage(_) => ErrorKind::InternalFailure,
        }
    }

    /// The failure is the uploader's to fix.
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::InternalFailure
    }

    /// Per-row or per-field details, empty when the message says it all.
    pub fn details(&self) -> Vec<ErrorDetail> {
        match self {
            IngestError::Parse(ParseError::MalformedRow { line, details }) => {
                vec![ErrorDetail::Row {
                    line: *line,
                    message: details.clone(),
                }]
            }
            IngestError::Validation(err) => err
                .field_errors
                .iter()
                .cloned()
                .map(ErrorDetail::Field)
                .collect(),
            _ => Vec::new(),
        }
    }
}
