use bazar_core::{DailyBar, clip_trailing_days, merge_daily_series};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn midnight(day_offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day_offset)
}

fn bar(day_offset: i64, close: f64) -> DailyBar {
    let mut b = DailyBar::empty("ADBL", midnight(day_offset));
    b.close = Some(close);
    b
}

fn arb_series(tag: f64) -> impl Strategy<Value = Vec<DailyBar>> {
    proptest::collection::vec((0i64..400i64, 0u32..100_000u32), 0..120).prop_map(move |entries| {
        entries
            .into_iter()
            .map(|(d, c)| bar(d, f64::from(c) + tag))
            .collect()
    })
}

proptest! {
    #[test]
    fn merged_series_is_sorted_and_date_unique(
        archive in arb_series(0.0),
        live in arb_series(0.25),
    ) {
        let merged = merge_daily_series(archive, live);
        let mut seen = BTreeSet::new();
        let mut prev = None;
        for b in &merged {
            if let Some(p) = prev {
                prop_assert!(p < b.date());
            }
            prev = Some(b.date());
            prop_assert!(seen.insert(b.date()));
        }
    }

    #[test]
    fn live_wins_on_shared_dates(
        archive in arb_series(0.0),
        live in arb_series(0.25),
    ) {
        let live_dates: BTreeSet<_> = live.iter().map(DailyBar::date).collect();
        let merged = merge_daily_series(archive.clone(), live.clone());

        for b in &merged {
            if live_dates.contains(&b.date()) {
                // Tagged with a fractional close, so provenance is observable.
                prop_assert_eq!(b.close.map(f64::fract), Some(0.25));
            } else {
                prop_assert!(archive.iter().any(|a| a.date() == b.date()));
            }
        }

        // Every input date appears exactly once in the output.
        let all_dates: BTreeSet<_> = archive
            .iter()
            .chain(live.iter())
            .map(DailyBar::date)
            .collect();
        let merged_dates: BTreeSet<_> = merged.iter().map(DailyBar::date).collect();
        prop_assert_eq!(merged_dates, all_dates);
    }

    #[test]
    fn clip_keeps_exactly_the_trailing_calendar_window(
        archive in arb_series(0.0),
        live in arb_series(0.25),
        days in 0usize..500usize,
    ) {
        let merged = merge_daily_series(archive, live);
        let clipped = clip_trailing_days(merged.clone(), days);
        match merged.last() {
            None => prop_assert!(clipped.is_empty()),
            Some(last) => {
                // The window is anchored at the last bar's date and bounded
                // by calendar distance, never by record position.
                let cutoff = last.date() - Duration::days(days as i64);
                let expected: Vec<_> = merged
                    .iter()
                    .filter(|b| b.date() > cutoff)
                    .cloned()
                    .collect();
                prop_assert_eq!(clipped, expected);
            }
        }
    }
}

#[test]
fn merge_with_empty_live_is_sorted_archive() {
    let archive = vec![bar(5, 10.0), bar(1, 11.0), bar(3, 12.0)];
    let merged = merge_daily_series(archive, vec![]);
    let closes: Vec<_> = merged.iter().filter_map(|b| b.close).collect();
    assert_eq!(closes, vec![11.0, 12.0, 10.0]);
}

#[test]
fn merge_with_empty_archive_is_sorted_live() {
    let live = vec![bar(2, 1.0), bar(0, 2.0)];
    let merged = merge_daily_series(vec![], live);
    let closes: Vec<_> = merged.iter().filter_map(|b| b.close).collect();
    assert_eq!(closes, vec![2.0, 1.0]);
}

#[test]
fn merge_collapses_time_of_day_noise() {
    // Same calendar date, different times of day: live replaces archive.
    let mut a = DailyBar::empty("ADBL", midnight(0));
    a.close = Some(100.0);
    let mut l = DailyBar::empty("ADBL", midnight(0) + Duration::hours(15));
    l.close = Some(101.0);

    let merged = merge_daily_series(vec![a], vec![l]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].close, Some(101.0));
}

#[test]
fn live_replacement_is_whole_record() {
    // An archive bar rich in fields is replaced by a sparse live bar; no
    // field-level splicing may leak archive values through.
    let mut a = DailyBar::empty("ADBL", midnight(0));
    a.close = Some(100.0);
    a.volume = Some(5_000.0);
    a.high_52w = Some(140.0);

    let mut l = DailyBar::empty("ADBL", midnight(0));
    l.close = Some(101.0);

    let merged = merge_daily_series(vec![a], vec![l.clone()]);
    assert_eq!(merged, vec![l]);
}

#[test]
fn clip_zero_days_is_empty() {
    let merged = merge_daily_series(vec![bar(0, 1.0), bar(1, 2.0)], vec![]);
    assert!(clip_trailing_days(merged, 0).is_empty());
}

#[test]
fn clip_measures_calendar_days_across_gaps() {
    // A long dormancy gap: the stale bar falls outside the window even
    // though only two records exist.
    let merged = merge_daily_series(vec![bar(0, 1.0), bar(152, 2.0)], vec![]);
    let clipped = clip_trailing_days(merged, 30);
    assert_eq!(clipped.len(), 1);
    assert_eq!(clipped[0].close, Some(2.0));
}

#[test]
fn clip_excludes_the_cutoff_day_itself() {
    let merged = merge_daily_series(vec![bar(0, 1.0), bar(6, 2.0), bar(7, 3.0)], vec![]);
    // Seven days back from the last bar lands exactly on day offset 0,
    // which falls just outside a seven-day window ending on day 7.
    let clipped = clip_trailing_days(merged, 7);
    let closes: Vec<_> = clipped.iter().filter_map(|b| b.close).collect();
    assert_eq!(closes, vec![2.0, 3.0]);
}

#[test]
fn clip_with_an_oversized_window_keeps_everything() {
    let merged = merge_daily_series(vec![bar(0, 1.0), bar(300, 2.0)], vec![]);
    assert_eq!(clip_trailing_days(merged.clone(), usize::MAX), merged);
}
