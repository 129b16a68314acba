use super::{DataRow, Dataset};
use serde::Serialize;
use utoipa::ToSchema;

/// Aggregates over the numeric cells of one column.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub sum: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Text cells and missing cells are ignored.
pub fn column_stats(dataset: &Dataset, column: &str) -> ColumnStats {
    let numbers: Vec<f64> = dataset
        .data
        .iter()
        .filter_map(|row| row.get(column).and_then(|v| v.as_number()))
        .collect();

    let count = numbers.len();
    let sum: f64 = numbers.iter().sum();
    let min = numbers.iter().copied().reduce(f64::min);
    let max = numbers.iter().copied().reduce(f64::max);
    let avg = (count > 0).then(|| sum / count as f64);

    ColumnStats {
        column: column.to_string(),
        count,
        sum,
        avg,
        min,
        max,
    }
}

/// Rows where some cell contains `filter`, ignoring case.
pub fn filter_rows<'a>(dataset: &'a Dataset, filter: &str) -> Vec<&'a DataRow> {
    let needle = filter.to_lowercase();
    dataset
        .data
        .iter()
        .filter(|row| {
            needle.is_empty()
                || row
                    .values()
                    .any(|v| v.to_string().to_lowercase().contains(&needle))
        })
        .collect()
}
