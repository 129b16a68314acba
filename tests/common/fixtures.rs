/// Test data fixtures for consistent testing
use std::path::PathBuf;

pub fn people_csv() -> &'static str {
    "name,age\nAlice,30\nBob,25\n"
}

pub fn ragged_csv() -> &'static str {
    "a,b\n1,2\n3\n"
}

pub fn header_only_csv() -> &'static str {
    "a,b,c\n"
}

/// Monthly figures, with a text cell in the numeric column.
pub fn monthly_sales_csv() -> &'static str {
    r#"month,revenue,note
Jan,100,
Feb,250.5,"promo, spring"
Mar,n/a,missing
Apr,-50,refund
"#
}

/// Reads a file from tests/fixtures.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|err| panic!("Cannot read {}: {}", path.display(), err))
}
