use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::types::DailyBar;

/// Merge a symbol's archive and live series into one ordered, per-date view.
///
/// - Bars are keyed by calendar date ([`DailyBar::date`]), so rows whose
///   timestamps differ only in time of day land on the same key.
/// - The live bar wins for duplicate dates: live data is fresher than the
///   archived copy of the same session. Replacement is whole-record; fields
///   are never spliced together from both sides.
/// - The result is sorted ascending by date. Either input may be empty.
#[must_use]
pub fn merge_daily_series(archive: Vec<DailyBar>, live: Vec<DailyBar>) -> Vec<DailyBar> {
    let mut map: BTreeMap<NaiveDate, DailyBar> = BTreeMap::new();
    for bar in archive {
        map.insert(bar.date(), bar);
    }
    for bar in live {
        map.insert(bar.date(), bar);
    }
    map.into_values().collect()
}

/// Keep only the bars dated within the trailing `days` calendar days of an
/// ascending-by-date series.
///
/// The window is anchored at the series' last date and counts calendar days,
/// not records: a series with weekend and holiday gaps keeps fewer than
/// `days` bars. A window reaching past the first bar returns the series
/// unchanged, and `0` returns an empty vector.
#[must_use]
pub fn clip_trailing_days(series: Vec<DailyBar>, days: usize) -> Vec<DailyBar> {
    let Some(last) = series.last().map(DailyBar::date) else {
        return series;
    };
    // An oversized window saturates to "keep everything" instead of
    // overflowing date arithmetic.
    let Some(cutoff) = i64::try_from(days)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|window| last.checked_sub_signed(window))
    else {
        return series;
    };
    series.into_iter().filter(|bar| bar.date() > cutoff).collect()
}
