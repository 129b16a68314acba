use super::{Dataset, Value};
use crate::infer::parsing::coerce;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
}

/// Case-insensitive, as chart types come from query strings.
impl FromStr for ChartType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            _ => bail!("Unknown chart type '{}', expected bar, line or pie", s),
        }
    }
}

/// Which two columns a chart plots, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
}

impl ChartConfig {
    /// A bar chart of the second column against the first one.
    pub fn default_for(headers: &[String]) -> Option<Self> {
        match headers {
            [x, y, ..] => Some(Self {
                chart_type: ChartType::Bar,
                x_axis: x.clone(),
                y_axis: y.clone(),
            }),
            _ => None,
        }
    }

    /// Both axes must name a header of the dataset.
    pub fn check_against(&self, headers: &[String]) -> Result<()> {
        for (axis, name) in [("xAxis", &self.x_axis), ("yAxis", &self.y_axis)] {
            if !headers.iter().any(|h| h == name) {
                bail!("{} '{}' is not a column of the dataset", axis, name);
            }
        }
        Ok(())
    }
}

/// The points of a chart, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub config: ChartConfig,
    /// One label per row, taken from the x axis column.
    pub labels: Vec<Option<Value>>,
    /// One value per row, taken from the y axis column.
    pub values: Vec<f64>,
}

/// Reads a cell as a chart value. Text that isn't a number counts as zero.
pub fn plot_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => *n,
        Some(Value::Text(s)) => coerce(s.trim()).as_number().unwrap_or(0.0),
        None => 0.0,
    }
}

pub fn build_series(dataset: &Dataset, config: ChartConfig) -> Result<ChartSeries> {
    config.check_against(&dataset.headers)?;
    let labels = dataset
        .data
        .iter()
        .map(|row| row.get(&config.x_axis).cloned())
        .collect();
    let values = dataset
        .data
        .iter()
        .map(|row| plot_value(row.get(&config.y_axis)))
        .collect();
    Ok(ChartSeries {
        config,
        labels,
        values,
    })
}
