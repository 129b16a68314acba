use super::{ParseError, ParsedTable};
use crate::datamodel::DataRow;
use crate::infer::parsing::coerce;
use ::csv::{ReaderBuilder, StringRecord};
use tracing::debug;

/// Parses a comma separated file whose first non-empty record holds the headers.
///
/// Any structural problem rejects the whole file.
pub fn parse_csv(bytes: &[u8]) -> Result<ParsedTable, ParseError> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    if let Some(line) = find_unterminated_quote(text) {
        return Err(ParseError::malformed_row(
            Some(line),
            "quoted field is never closed",
        ));
    }

    // Field counts are checked here, once blank records are out of the way.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        match &headers {
            None => headers = Some(record.iter().map(str::to_string).collect()),
            Some(names) => {
                check_width(names.len(), &record)?;
                rows.push(to_row(names, &record));
            }
        }
    }

    let headers = headers.unwrap_or_default();
    debug!(
        "Parsed CSV with {} columns and {} rows",
        headers.len(),
        rows.len()
    );
    if rows.is_empty() {
        return Err(ParseError::EmptyDataset);
    }

    Ok(ParsedTable { headers, rows })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn check_width(expected: usize, record: &StringRecord) -> Result<(), ParseError> {
    if record.len() == expected {
        return Ok(());
    }
    Err(ParseError::malformed_row(
        record.position().map(|p| p.line()),
        format!("expected {} fields but found {}", expected, record.len()),
    ))
}

fn to_row(headers: &[String], record: &StringRecord) -> DataRow {
    headers
        .iter()
        .zip(record.iter())
        .map(|(name, field)| (name.clone(), coerce(field)))
        .collect()
}

/// Returns the line where a quoted field opens without ever being closed.
///
/// The csv reader silently runs such a field up to the end of the input.
fn find_unterminated_quote(text: &str) -> Option<u64> {
    let mut line = 1u64;
    let mut opened_at = None;
    let mut at_field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (opened_at, c) {
            (None, '"') if at_field_start => {
                opened_at = Some(line);
                at_field_start = false;
            }
            (Some(_), '"') => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    opened_at = None;
                }
            }
            (None, ',') => at_field_start = true,
            // \n, \r\n and a lone \r all end a line
            (_, '\n') | (_, '\r') => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                if opened_at.is_none() {
                    at_field_start = true;
                }
            }
            (None, _) => at_field_start = false,
            (Some(_), _) => {}
        }
    }

    opened_at
}
