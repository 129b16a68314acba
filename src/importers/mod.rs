pub mod csv;
pub mod error;
pub mod spreadsheet;

use crate::datamodel::{CandidateDataset, DataRow};
pub use error::ParseError;
use tracing::debug;

/// Headers and rows read from an uploaded file, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<DataRow>,
}

impl ParsedTable {
    pub fn into_candidate(self, file_name: &str) -> CandidateDataset {
        CandidateDataset {
            file_name: file_name.to_string(),
            headers: self.headers,
            data: self.rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet,
}

impl FileFormat {
    /// Picks the format from the file name suffix, ignoring case.
    ///
    /// A bare `.csv` counts as a CSV file.
    pub fn from_file_name(file_name: &str) -> Result<Self, ParseError> {
        let name = file_name.to_ascii_lowercase();
        if name.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if name.ends_with(".xls") || name.ends_with(".xlsx") {
            Ok(FileFormat::Spreadsheet)
        } else {
            Err(ParseError::UnsupportedFormat {
                file_name: file_name.to_string(),
            })
        }
    }
}

/// Turns an uploaded file into headers and coerced rows.
///
/// The format is decided from the file name before the bytes are looked at.
pub fn parse(bytes: &[u8], file_name: &str) -> Result<ParsedTable, ParseError> {
    let format = FileFormat::from_file_name(file_name)?;
    debug!("Parsing {} ({} bytes) as {:?}", file_name, bytes.len(), format);
    match format {
        FileFormat::Csv => csv::parse_csv(bytes),
        FileFormat::Spreadsheet => spreadsheet::parse_spreadsheet(bytes),
    }
}
