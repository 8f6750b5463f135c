use std::sync::Arc;

use bazar::{Bazar, BazarError, DailyBar};
use bazar_mock::{MemoryArchive, MemoryLive};
use chrono::{Duration, TimeZone, Utc};

fn bar(symbol: &str, day_offset: i64, ltp: f64) -> DailyBar {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day_offset);
    let mut b = DailyBar::empty(symbol, ts);
    b.ltp = Some(ltp);
    b.diff_percent = Some(1.5);
    b.volume = Some(1_000.0);
    b.high_52w = Some(ltp + 50.0);
    b.low_52w = Some(ltp - 50.0);
    b
}

fn engine(archive: Vec<DailyBar>, live: Vec<DailyBar>) -> Bazar {
    Bazar::builder()
        .with_archive(Arc::new(MemoryArchive::with_bars(archive)))
        .with_live(Arc::new(MemoryLive::with_bars(live)))
        .build()
        .unwrap()
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn snapshots_come_from_the_most_recent_archived_date() {
    let bazar = engine(
        vec![
            bar("ADBL", 0, 100.0),
            bar("ADBL", 5, 130.0),
            bar("ADBL", 3, 120.0),
        ],
        vec![],
    );

    let snaps = bazar.compare(&symbols(&["ADBL"])).await.unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].symbol, "ADBL");
    assert_eq!(snaps[0].price, Some(130.0));
    assert_eq!(snaps[0].high_52w, Some(180.0));
}

#[tokio::test]
async fn live_data_is_not_consulted() {
    // The live store has a fresher bar, but snapshots anchor on the archive.
    let bazar = engine(vec![bar("ADBL", 1, 100.0)], vec![bar("ADBL", 9, 999.0)]);
    let snaps = bazar.compare(&symbols(&["ADBL"])).await.unwrap();
    assert_eq!(snaps[0].price, Some(100.0));
}

#[tokio::test]
async fn unknown_symbols_are_omitted_not_fatal() {
    let bazar = engine(vec![bar("ADBL", 0, 100.0)], vec![]);
    let snaps = bazar
        .compare(&symbols(&["NOPE", "ADBL", "ALSO_NOPE"]))
        .await
        .unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].symbol, "ADBL");
}

#[tokio::test]
async fn requested_order_is_preserved() {
    let bazar = engine(
        vec![bar("NABIL", 0, 500.0), bar("ADBL", 0, 300.0)],
        vec![],
    );
    let snaps = bazar.compare(&symbols(&["NABIL", "ADBL"])).await.unwrap();
    let order: Vec<_> = snaps.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(order, vec!["NABIL", "ADBL"]);
}

#[tokio::test]
async fn empty_symbol_list_is_invalid() {
    let bazar = engine(vec![], vec![]);
    let err = bazar.compare(&[]).await.unwrap_err();
    assert!(matches!(err, BazarError::InvalidArg(_)));
}
