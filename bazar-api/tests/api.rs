use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use bazar::Bazar;
use bazar::ingest::{CsvImporter, IngestMode};
use bazar_api::{AppState, router};
use bazar_core::{ArchiveStore, DailyBar};
use bazar_mock::{MemoryArchive, MemoryLive};
use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;
use tower::ServiceExt;

fn bar(symbol: &str, day_offset: i64, close: f64) -> DailyBar {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day_offset);
    let mut b = DailyBar::empty(symbol, ts);
    b.close = Some(close);
    b.ltp = Some(close);
    b
}

fn app_with(archive: Vec<DailyBar>, live: Vec<DailyBar>, import_dir: PathBuf) -> Router {
    let archive = Arc::new(MemoryArchive::with_bars(archive));
    let live = Arc::new(MemoryLive::with_bars(live));
    let bazar = Arc::new(
        Bazar::builder()
            .with_archive(archive.clone() as Arc<dyn ArchiveStore>)
            .with_live(live)
            .build()
            .unwrap(),
    );
    let importer = Arc::new(CsvImporter::new(archive, IngestMode::Upsert));
    router(AppState::new(bazar, importer, import_dir))
}

fn app(archive: Vec<DailyBar>, live: Vec<DailyBar>) -> Router {
    app_with(archive, live, PathBuf::from("/nonexistent"))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn list_returns_the_sorted_union() {
    let app = app(vec![bar("NABIL", 0, 1.0)], vec![bar("ADBL", 0, 2.0)]);
    let (status, body) = get_json(app, "/stocks/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["ADBL", "NABIL"]));
}

#[tokio::test]
async fn history_merges_with_live_precedence() {
    let app = app(
        vec![bar("ADBL", 0, 100.0), bar("ADBL", 1, 101.0)],
        vec![bar("ADBL", 1, 105.0)],
    );
    let (status, body) = get_json(app, "/stocks/ADBL/history").await;
    assert_eq!(status, StatusCode::OK);
    let closes: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["close"].as_f64().unwrap())
        .collect();
    assert_eq!(closes, vec![100.0, 105.0]);
}

#[tokio::test]
async fn history_uppercases_the_path_symbol() {
    let app = app(vec![bar("ADBL", 0, 100.0)], vec![]);
    let (status, _) = get_json(app, "/stocks/adbl/history").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_symbol_is_a_404_with_a_message() {
    let app = app(vec![], vec![]);
    let (status, body) = get_json(app, "/stocks/NOPE/history").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("NOPE"));
}

#[tokio::test]
async fn windowed_history_defaults_and_clips() {
    let archive: Vec<_> = (0..400).map(|d| bar("ADBL", d, 1.0)).collect();
    let app = app(archive, vec![]);

    let (_, body) = get_json(app.clone(), "/stocks/history/ADBL").await;
    assert_eq!(body.as_array().unwrap().len(), 365);

    let (_, body) = get_json(app, "/stocks/history/ADBL?days=7").await;
    assert_eq!(body.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn compare_requires_symbols_and_snapshots_the_latest_bar() {
    let app = app(
        vec![bar("ADBL", 0, 100.0), bar("ADBL", 3, 130.0)],
        vec![],
    );

    let (status, _) = get_json(app.clone(), "/stocks/compare").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json(app, "/stocks/compare?symbols=ADBL,NOPE").await;
    assert_eq!(status, StatusCode::OK);
    let snaps = body.as_array().unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0]["symbol"], "ADBL");
    assert_eq!(snaps[0]["price"], 130.0);
}

#[tokio::test]
async fn compare_matches_symbols_verbatim() {
    let app = app(vec![bar("ADBL", 0, 100.0)], vec![]);

    // Unlike the history paths, compare does not fold case.
    let (status, body) = get_json(app, "/stocks/compare?symbols=adbl").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn search_requires_a_query() {
    let app = app(vec![bar("ADBL", 0, 1.0), bar("NABIL", 0, 1.0)], vec![]);

    let (status, _) = get_json(app.clone(), "/stocks/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A present-but-empty query is not an error, it just matches nothing.
    let (status, body) = get_json(app.clone(), "/stocks/search?q=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    let (status, body) = get_json(app, "/stocks/search?q=bl").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["ADBL", "NABIL"]));
}

#[tokio::test]
async fn import_endpoint_runs_the_pipeline_synchronously() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("2024_01_02.csv"),
        "Symbol,Open,High,Low,Close,LTP\nADBL,310,315,308,312,312.5\n",
    )
    .unwrap();

    let app = app_with(vec![], vec![], dir.path().to_path_buf());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/import-csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["batches"], 1);
    assert_eq!(body["imported"], 1);
    assert_eq!(body["inserted"], 1);

    // The imported bar is immediately visible through the read side.
    let (status, history) = get_json(app, "/stocks/ADBL/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["close"], 312.0);
}
