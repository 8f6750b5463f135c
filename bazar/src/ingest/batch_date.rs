use bazar_core::BazarError;
use chrono::{DateTime, NaiveDate, Utc};

/// Derive a batch's trading date from its filename stem.
///
/// Batch files are named `YYYY_MM_DD.csv` or `YYYY-MM-DD.csv`; the stem
/// (without extension) must be exactly three separator-delimited numeric
/// fields forming a real calendar date. The result is that date at UTC
/// midnight, the timestamp every row of the batch is stamped with.
///
/// # Errors
/// Returns `InvalidFilenameDate` if the stem does not have that shape or
/// names an impossible date (e.g. `2024_02_30`).
pub fn parse_batch_date(stem: &str) -> Result<DateTime<Utc>, BazarError> {
    let bad = || BazarError::invalid_filename_date(stem);

    let mut parts = stem.splitn(4, ['_', '-']);
    let year = parts.next().and_then(|p| p.parse::<i32>().ok());
    let month = parts.next().and_then(|p| p.parse::<u32>().ok());
    let day = parts.next().and_then(|p| p.parse::<u32>().ok());
    if parts.next().is_some() {
        return Err(bad());
    }

    let (Some(year), Some(month), Some(day)) = (year, month, day) else {
        return Err(bad());
    };
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(bad)?;
    Ok(midnight.and_utc())
}
