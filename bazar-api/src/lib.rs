//! HTTP surface for the bazar reconciliation engine.
//!
//! Thin axum layer: every endpoint delegates to [`bazar::Bazar`] or
//! [`bazar::ingest::CsvImporter`] and translates the engine's error taxonomy
//! into HTTP statuses. No business logic lives here.
//!
//! Routes:
//! - `GET  /stocks/list` — sorted distinct symbols from both stores.
//! - `GET  /stocks/{symbol}/history` — full merged series, 404 when neither
//!   store knows the symbol.
//! - `GET  /stocks/history/{symbol}?days=N` — merged series clipped to the
//!   last `N` records (default 365).
//! - `GET  /stocks/compare?symbols=A,B` — latest archive snapshot per symbol.
//! - `GET  /stocks/search?q=...` — up to ten matching symbols.
//! - `POST /import-csv` — runs the importer over the configured folder,
//!   synchronously.
#![warn(missing_docs)]

mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
