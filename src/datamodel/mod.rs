pub mod chart;
pub mod dataset;
pub mod summary;
pub mod validation;
pub mod value;

pub use chart::{ChartConfig, ChartSeries, ChartType};
pub use dataset::{DataRow, Dataset, InsertDataset};
pub use validation::{CandidateDataset, FieldError, ValidationError, validate};
pub use value::Value;
