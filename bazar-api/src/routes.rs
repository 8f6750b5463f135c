use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use bazar_core::{BazarError, DailyBar, SymbolSnapshot};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Window applied when `?days` is absent: roughly one trading year.
const DEFAULT_DAYS: usize = 365;

/// Build the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/stocks/list", get(list_symbols))
        .route("/stocks/{symbol}/history", get(full_history))
        .route("/stocks/history/{symbol}", get(windowed_history))
        .route("/stocks/compare", get(compare))
        .route("/stocks/search", get(search))
        .route("/import-csv", post(import_csv))
        .with_state(state)
}

async fn list_symbols(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.bazar.symbols().await?))
}

async fn full_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<DailyBar>>, ApiError> {
    let symbol = symbol.to_uppercase();
    Ok(Json(state.bazar.history(&symbol).await?))
}

#[derive(Debug, Deserialize)]
struct WindowParams {
    days: Option<usize>,
}

async fn windowed_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<WindowParams>,
) -> Result<Json<Vec<DailyBar>>, ApiError> {
    let symbol = symbol.to_uppercase();
    let days = params.days.unwrap_or(DEFAULT_DAYS);
    Ok(Json(state.bazar.history_last_days(&symbol, days).await?))
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    symbols: Option<String>,
}

async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Vec<SymbolSnapshot>>, ApiError> {
    // Symbols are matched verbatim; only the history paths normalize case.
    let symbols: Vec<String> = params
        .symbols
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if symbols.is_empty() {
        return Err(BazarError::invalid_arg("symbols parameter is required").into());
    }
    Ok(Json(state.bazar.compare(&symbols).await?))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let query = params
        .q
        .ok_or_else(|| BazarError::invalid_arg("q parameter is required"))?;
    Ok(Json(state.bazar.search(&query).await?))
}

/// Counts reported back to the import caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    batches: usize,
    imported: usize,
    skipped: usize,
    inserted: u64,
    modified: u64,
}

async fn import_csv(State(state): State<AppState>) -> Result<Json<ImportResponse>, ApiError> {
    info!(dir = %state.import_dir.display(), "import requested");
    let summary = state.importer.run_dir(&state.import_dir).await?;
    Ok(Json(ImportResponse {
        batches: summary.batches.len(),
        imported: summary.imported(),
        skipped: summary.skipped(),
        inserted: summary.totals.inserted,
        modified: summary.totals.modified,
    }))
}
