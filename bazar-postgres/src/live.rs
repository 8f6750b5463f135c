use async_trait::async_trait;
use bazar_core::{BazarError, DailyBar, LiveStore};
use sqlx::postgres::PgPool;
use tracing::debug;

use crate::record::{BarRecord, COLUMNS};

fn live_err(err: &sqlx::Error) -> BazarError {
    BazarError::store("live", err.to_string())
}

/// Live store backed by the `live_bars` table, which an external scraper
/// refreshes. This side never writes.
#[derive(Debug, Clone)]
pub struct PgLiveStore {
    pool: PgPool,
}

impl PgLiveStore {
    /// A store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LiveStore for PgLiveStore {
    async fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<DailyBar>, BazarError> {
        let sql = format!("SELECT {COLUMNS} FROM live_bars WHERE symbol = $1 ORDER BY day");
        let records: Vec<BarRecord> = sqlx::query_as(&sql)
            .bind(symbol)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| live_err(&e))?;
        debug!(symbol, rows = records.len(), "live read");
        Ok(records.into_iter().map(BarRecord::into_bar).collect())
    }

    async fn distinct_symbols(&self) -> Result<Vec<String>, BazarError> {
        sqlx::query_scalar("SELECT DISTINCT symbol FROM live_bars ORDER BY symbol")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| live_err(&e))
    }
}
