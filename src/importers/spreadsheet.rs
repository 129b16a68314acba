use super::{ParseError, ParsedTable};
use crate::datamodel::{DataRow, Value};
use crate::infer::parsing::{coerce, coerce_number};
use calamine::{Data, DataType, Range, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use tracing::debug;

/// Parses the first sheet of an xls/xlsx/ods workbook.
///
/// The first non-empty row gives the headers. Cells to the right of the last
/// header are kept under a generated `__EMPTY_<n>` name, so they surface as
/// unknown columns during validation instead of being dropped.
pub fn parse_spreadsheet(bytes: &[u8]) -> Result<ParsedTable, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(ParseError::EmptyDataset),
    };
    parse_range(&range)
}

fn parse_range(range: &Range<Data>) -> Result<ParsedTable, ParseError> {
    let mut rows_iter = range.rows().skip_while(|row| is_blank(row));

    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => {
            let width = header_row
                .iter()
                .rposition(|cell| !cell.is_empty())
                .map_or(0, |last| last + 1);
            header_row[..width].iter().map(header_label).collect()
        }
        None => return Err(ParseError::EmptyDataset),
    };

    let rows: Vec<DataRow> = rows_iter
        .filter(|row| !is_blank(row))
        .map(|row| to_row(&headers, row))
        .collect();

    debug!(
        "Parsed spreadsheet with {} columns and {} rows",
        headers.len(),
        rows.len()
    );
    if rows.is_empty() {
        return Err(ParseError::EmptyDataset);
    }

    Ok(ParsedTable { headers, rows })
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::String(s) => s.trim().is_empty(),
        other => other.is_empty(),
    })
}

fn header_label(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_row(headers: &[String], cells: &[Data]) -> DataRow {
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(i, cell)| {
            let name = headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("__EMPTY_{}", i));
            (name, coerce_cell(cell))
        })
        .collect()
}

/// Applies the textual coercion rule to a typed spreadsheet cell.
pub fn coerce_cell(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => coerce_number(*f),
        Data::String(s) => coerce(s),
        Data::Bool(b) => Value::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Value::Text(datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => coerce_number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(e.to_string()),
        Data::Empty => Value::Text(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(cells: Vec<Vec<Data>>) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn test_parse_range() {
        let table = parse_range(&range(vec![
            vec![s("product"), s("units"), s("price")],
            vec![s("apple"), Data::Int(3), Data::Float(1.25)],
            vec![s("pear"), s("12"), s("n/a")],
        ]))
        .unwrap();

        assert_eq!(table.headers, vec!["product", "units", "price"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["units"], Value::Number(3.0));
        assert_eq!(table.rows[0]["price"], Value::Number(1.25));
        // numeric text goes through the same coercion as csv cells
        assert_eq!(table.rows[1]["units"], Value::Number(12.0));
        assert_eq!(table.rows[1]["price"], Value::from("n/a"));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let table = parse_range(&range(vec![
            vec![Data::Empty, Data::Empty],
            vec![s("a"), s("b")],
            vec![Data::Empty, s("  ")],
            vec![Data::Int(1), Data::Int(2)],
        ]))
        .unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let table = parse_range(&range(vec![
            vec![s("a"), s("b")],
            vec![Data::Int(1), Data::Empty],
        ]))
        .unwrap();
        assert_eq!(table.rows[0].len(), 1);
        assert!(!table.rows[0].contains_key("b"));
    }

    #[test]
    fn test_stray_cells_get_generated_names() {
        let table = parse_range(&range(vec![
            vec![s("a"), Data::Empty, Data::Empty],
            vec![Data::Int(1), Data::Empty, s("stray")],
        ]))
        .unwrap();
        assert_eq!(table.headers, vec!["a"]);
        assert_eq!(table.rows[0]["__EMPTY_2"], Value::from("stray"));
    }

    #[test]
    fn test_numeric_headers_become_labels() {
        let table = parse_range(&range(vec![
            vec![Data::Int(2023), Data::Int(2024)],
            vec![Data::Int(1), Data::Int(2)],
        ]))
        .unwrap();
        assert_eq!(table.headers, vec!["2023", "2024"]);
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let err = parse_range(&range(vec![vec![s("a"), s("b")]])).unwrap_err();
        assert!(matches!(err, ParseError::EmptyDataset));
    }

    #[test]
    fn test_coerce_cell() {
        assert_eq!(coerce_cell(&Data::Bool(true)), Value::from("TRUE"));
        assert_eq!(coerce_cell(&Data::Float(f64::NAN)), Value::from("NaN"));
        assert_eq!(
            coerce_cell(&Data::DateTimeIso("2024-01-31".to_string())),
            Value::from("2024-01-31")
        );
        assert_eq!(coerce_cell(&s("-7.5")), Value::Number(-7.5));
    }

    #[test]
    fn test_garbage_bytes_fail_to_open() {
        let err = parse_spreadsheet(b"this is not a workbook").unwrap_err();
        assert!(matches!(err, ParseError::Spreadsheet(_)));
    }
}
