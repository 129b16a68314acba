use super::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One table row, keyed by header name.
pub type DataRow = BTreeMap<String, Value>;

/// A validated table that has not been stored yet.
///
/// Only [`super::validation::validate`] builds one, so holding an
/// `InsertDataset` means the headers, rows and file name passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertDataset {
    file_name: String,
    headers: Vec<String>,
    data: Vec<DataRow>,
}

impl InsertDataset {
    pub(super) fn new(file_name: String, headers: Vec<String>, data: Vec<DataRow>) -> Self {
        Self {
            file_name,
            headers,
            data,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn data(&self) -> &[DataRow] {
        &self.data
    }
}

/// A stored dataset, as served to the visualization client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "people.csv")]
    pub file_name: String,
    #[schema(example = json!(["name", "age"]))]
    pub headers: Vec<String>,
    #[schema(value_type = Vec<Object>, example = json!([{"name": "Alice", "age": 30}]))]
    pub data: Vec<DataRow>,
    #[schema(example = "2024-05-01T09:30:00.000Z")]
    pub uploaded_at: String,
}

impl Dataset {
    /// Gives an identity and upload time to a validated dataset.
    pub fn from_insert(insert: InsertDataset, id: u64, uploaded_at: String) -> Self {
        let InsertDataset {
            file_name,
            headers,
            data,
        } = insert;
        Self {
            id,
            file_name,
            headers,
            data,
            uploaded_at,
        }
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}
