use thiserror::Error;

/// Why an uploaded file could not be turned into a table.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The file name has no extension we know how to read
    #[error("Unsupported file format for '{file_name}'. Please upload a CSV or Excel file.")]
    UnsupportedFormat { file_name: String },

    /// A record broke the structure of the file (quoting, field count)
    #[error("Invalid CSV file: {}", describe_location(.line, .details))]
    MalformedRow { line: Option<u64>, details: String },

    /// The file parsed but holds no data row
    #[error("File contains no data")]
    EmptyDataset,

    /// The spreadsheet binary could not be read
    #[error("Unable to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

fn describe_location(line: &Option<u64>, details: &str) -> String {
    match line {
        Some(line) => format!("line {}: {}", line, details),
        None => details.to_string(),
    }
}

impl ParseError {
    pub fn malformed_row(line: Option<u64>, details: impl Into<String>) -> Self {
        ParseError::MalformedRow {
            line,
            details: details.into(),
        }
    }
}

impl From<::csv::Error> for ParseError {
    fn from(err: ::csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        ParseError::malformed_row(line, err.to_string())
    }
}
