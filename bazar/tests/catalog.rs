use std::sync::Arc;

use bazar::{Bazar, DailyBar};
use bazar_mock::{MemoryArchive, MemoryLive};
use chrono::{TimeZone, Utc};

fn bar(symbol: &str) -> DailyBar {
    DailyBar::empty(symbol, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

fn engine(archive: &[&str], live: &[&str]) -> Bazar {
    Bazar::builder()
        .with_archive(Arc::new(MemoryArchive::with_bars(
            archive.iter().map(|s| bar(s)).collect(),
        )))
        .with_live(Arc::new(MemoryLive::with_bars(
            live.iter().map(|s| bar(s)).collect(),
        )))
        .build()
        .unwrap()
}

#[tokio::test]
async fn symbols_are_the_sorted_union_of_both_stores() {
    let bazar = engine(&["B", "A"], &["C", "B"]);
    assert_eq!(bazar.symbols().await.unwrap(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn an_empty_store_does_not_sink_the_catalog() {
    let bazar = engine(&[], &["C"]);
    assert_eq!(bazar.symbols().await.unwrap(), vec!["C"]);

    let bazar = engine(&[], &[]);
    assert!(bazar.symbols().await.unwrap().is_empty());
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let bazar = engine(&["ADBL", "NABIL", "SBL", "GBIME"], &[]);
    assert_eq!(bazar.search("bl").await.unwrap(), vec!["ADBL", "NABIL", "SBL"]);
    assert_eq!(bazar.search("BIL").await.unwrap(), vec!["NABIL"]);
    assert!(bazar.search("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_ignores_the_live_store() {
    let bazar = engine(&["ADBL"], &["NABIL"]);
    assert!(bazar.search("nabil").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_caps_results_at_ten() {
    let symbols: Vec<String> = (0..25).map(|i| format!("BANK{i:02}")).collect();
    let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();
    let bazar = engine(&refs, &[]);
    assert_eq!(bazar.search("bank").await.unwrap().len(), 10);
}

#[tokio::test]
async fn blank_queries_match_nothing() {
    let bazar = engine(&["ADBL"], &[]);
    for q in ["", "   "] {
        assert!(bazar.search(q).await.unwrap().is_empty());
    }
}
