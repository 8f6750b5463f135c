use async_trait::async_trait;
use bazar_core::{ArchiveStore, BazarError, DailyBar, UpsertOutcome};
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::{Postgres, Row, query::Query};
use tracing::{debug, info};

use crate::record::{BarArrays, BarRecord, COLUMNS};

/// Bulk writes are chunked so a multi-year backfill cannot blow parameter or
/// memory limits in one statement.
const WRITE_CHUNK: usize = 500;

const UNNEST_ARRAYS: &str = "UNNEST(\
    $1::text[], $2::date[], $3::float8[], $4::float8[], $5::float8[], \
    $6::float8[], $7::float8[], $8::float8[], $9::float8[], $10::float8[], \
    $11::float8[], $12::float8[], $13::float8[], $14::float8[], $15::float8[], \
    $16::float8[], $17::float8[], $18::float8[], $19::float8[], $20::float8[], \
    $21::float8[], $22::float8[], $23::float8[])";

const UPSERT_SET: &str = "open = EXCLUDED.open, high = EXCLUDED.high, \
    low = EXCLUDED.low, close = EXCLUDED.close, ltp = EXCLUDED.ltp, \
    close_ltp_diff = EXCLUDED.close_ltp_diff, \
    close_ltp_diff_percent = EXCLUDED.close_ltp_diff_percent, \
    vwap = EXCLUDED.vwap, volume = EXCLUDED.volume, \
    prev_close = EXCLUDED.prev_close, turnover = EXCLUDED.turnover, \
    transactions = EXCLUDED.transactions, diff = EXCLUDED.diff, \
    \"range\" = EXCLUDED.\"range\", diff_percent = EXCLUDED.diff_percent, \
    range_percent = EXCLUDED.range_percent, \
    vwap_percent = EXCLUDED.vwap_percent, ma_120 = EXCLUDED.ma_120, \
    ma_180 = EXCLUDED.ma_180, high_52w = EXCLUDED.high_52w, \
    low_52w = EXCLUDED.low_52w";

fn bind_arrays<'q>(
    query: Query<'q, Postgres, PgArguments>,
    arrays: &'q BarArrays,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(&arrays.symbols)
        .bind(&arrays.days)
        .bind(&arrays.opens)
        .bind(&arrays.highs)
        .bind(&arrays.lows)
        .bind(&arrays.closes)
        .bind(&arrays.ltps)
        .bind(&arrays.close_ltp_diffs)
        .bind(&arrays.close_ltp_diff_percents)
        .bind(&arrays.vwaps)
        .bind(&arrays.volumes)
        .bind(&arrays.prev_closes)
        .bind(&arrays.turnovers)
        .bind(&arrays.transactions)
        .bind(&arrays.diffs)
        .bind(&arrays.ranges)
        .bind(&arrays.diff_percents)
        .bind(&arrays.range_percents)
        .bind(&arrays.vwap_percents)
        .bind(&arrays.ma_120s)
        .bind(&arrays.ma_180s)
        .bind(&arrays.high_52ws)
        .bind(&arrays.low_52ws)
}

fn archive_err(err: &sqlx::Error) -> BazarError {
    BazarError::store("archive", err.to_string())
}

/// Archive store backed by the `archive_bars` table.
#[derive(Debug, Clone)]
pub struct PgArchiveStore {
    pool: PgPool,
}

impl PgArchiveStore {
    /// A store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArchiveStore for PgArchiveStore {
    async fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<DailyBar>, BazarError> {
        let sql = format!("SELECT {COLUMNS} FROM archive_bars WHERE symbol = $1 ORDER BY day");
        let records: Vec<BarRecord> = sqlx::query_as(&sql)
            .bind(symbol)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| archive_err(&e))?;
        debug!(symbol, rows = records.len(), "archive read");
        Ok(records.into_iter().map(BarRecord::into_bar).collect())
    }

    async fn distinct_symbols(&self) -> Result<Vec<String>, BazarError> {
        sqlx::query_scalar("SELECT DISTINCT symbol FROM archive_bars ORDER BY symbol")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| archive_err(&e))
    }

    async fn bulk_upsert(&self, bars: &[DailyBar]) -> Result<UpsertOutcome, BazarError> {
        if bars.is_empty() {
            return Ok(UpsertOutcome::default());
        }

        // `xmax = 0` distinguishes freshly inserted rows from ones the
        // conflict arm overwrote.
        let sql = format!(
            "INSERT INTO archive_bars ({COLUMNS}) SELECT * FROM {UNNEST_ARRAYS} \
             ON CONFLICT (symbol, day) DO UPDATE SET {UPSERT_SET} \
             RETURNING (xmax = 0) AS freshly_inserted"
        );

        let mut outcome = UpsertOutcome::default();
        for chunk in bars.chunks(WRITE_CHUNK) {
            let arrays = BarArrays::from_bars(chunk);
            let rows = bind_arrays(sqlx::query(&sql), &arrays)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| archive_err(&e))?;
            for row in rows {
                let freshly_inserted: bool =
                    row.try_get("freshly_inserted").map_err(|e| archive_err(&e))?;
                if freshly_inserted {
                    outcome.inserted += 1;
                } else {
                    outcome.modified += 1;
                }
            }
        }
        info!(
            rows = bars.len(),
            inserted = outcome.inserted,
            modified = outcome.modified,
            "archive upsert"
        );
        Ok(outcome)
    }

    async fn insert_new(&self, bars: &[DailyBar]) -> Result<(), BazarError> {
        if bars.is_empty() {
            return Ok(());
        }

        let sql = format!("INSERT INTO archive_bars ({COLUMNS}) SELECT * FROM {UNNEST_ARRAYS}");

        for chunk in bars.chunks(WRITE_CHUNK) {
            let arrays = BarArrays::from_bars(chunk);
            bind_arrays(sqlx::query(&sql), &arrays)
                .execute(&self.pool)
                .await
                .map_err(|e| match &e {
                    sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                        BazarError::duplicate_key(db.message().to_string())
                    }
                    _ => archive_err(&e),
                })?;
        }
        info!(rows = bars.len(), "archive insert");
        Ok(())
    }
}
