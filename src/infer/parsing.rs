use crate::datamodel::Value;
use nom::{IResult, Parser, combinator::all_consuming, number::complete::double};

/// Parses the whole input as a float literal.
///
/// nom's `double` also recognizes `nan`, `inf` and `infinity`, which are
/// filtered out by [`coerce`].
pub fn parse_float(data: &str) -> IResult<&str, f64> {
    all_consuming(double).parse(data)
}

/// Coerces a textual cell into a number when it is one, keeping the text otherwise.
///
/// Surrounding whitespace is part of the cell, so `" 42"` stays text.
pub fn coerce(data: &str) -> Value {
    match parse_float(data) {
        Ok((_, f)) if f.is_finite() => Value::Number(f),
        _ => Value::Text(data.to_string()),
    }
}

/// Coerces a native number, such as a numeric spreadsheet cell.
pub fn coerce_number(f: f64) -> Value {
    if f.is_finite() {
        Value::Number(f)
    } else {
        Value::Text(f.to_string())
    }
}
