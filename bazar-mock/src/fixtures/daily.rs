use bazar_core::DailyBar;
use chrono::{DateTime, Utc};

/// Archived bars for a handful of fixture symbols, or `None` for unknown ones.
pub fn archive_by_symbol(s: &str) -> Option<Vec<DailyBar>> {
    match s {
        "ADBL" => Some(build(
            "ADBL",
            vec![
                ("2024-01-01", 310.0, 315.0, 308.0, 312.0, 312.5, 15_000.0),
                ("2024-01-02", 312.0, 318.0, 311.0, 316.0, 316.0, 18_200.0),
                ("2024-01-03", 316.0, 317.0, 310.0, 311.0, 311.1, 12_400.0),
            ],
        )),
        "NABIL" => Some(build(
            "NABIL",
            vec![
                ("2024-01-01", 540.0, 548.0, 538.0, 545.0, 545.0, 9_800.0),
                ("2024-01-02", 545.0, 552.0, 544.0, 550.0, 550.2, 11_300.0),
            ],
        )),
        _ => None,
    }
}

/// Live-window bars for the fixture symbols. The final archive date of
/// `"ADBL"` reappears here with fresher numbers, so merge behavior is
/// observable out of the box.
pub fn live_by_symbol(s: &str) -> Option<Vec<DailyBar>> {
    match s {
        "ADBL" => Some(build(
            "ADBL",
            vec![
                ("2024-01-03", 316.0, 319.0, 312.0, 314.0, 314.0, 13_900.0),
                ("2024-01-04", 314.0, 320.0, 313.0, 319.0, 319.5, 16_700.0),
            ],
        )),
        _ => None,
    }
}

fn ts(date: &str) -> DateTime<Utc> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn build(symbol: &str, rows: Vec<(&str, f64, f64, f64, f64, f64, f64)>) -> Vec<DailyBar> {
    rows.into_iter()
        .map(|(date, o, h, l, c, ltp, v)| {
            let mut bar = DailyBar::empty(symbol, ts(date));
            bar.open = Some(o);
            bar.high = Some(h);
            bar.low = Some(l);
            bar.close = Some(c);
            bar.ltp = Some(ltp);
            bar.volume = Some(v);
            bar.diff = Some(c - o);
            bar.diff_percent = Some((c - o) / o * 100.0);
            bar.range = Some(h - l);
            bar.high_52w = Some(h + 25.0);
            bar.low_52w = Some(l - 25.0);
            bar
        })
        .collect()
}
