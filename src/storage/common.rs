use anyhow::{Context, Result};
use hifitime::Epoch;

/// Formats an instant the way upload timestamps are exposed: `2024-05-01T09:30:00.000Z`.
pub fn format_timestamp(epoch: Epoch) -> String {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        day,
        hour,
        minute,
        second,
        nanos / 1_000_000
    )
}

pub fn timestamp_now() -> Result<String> {
    let now = Epoch::now().context("Failed to read the system clock")?;
    Ok(format_timestamp(now))
}
