use bazar_core::{BazarError, DailyBar, clip_trailing_days, merge_daily_series};
use tracing::debug;

use crate::Bazar;

impl Bazar {
    /// The full merged history for `symbol`, ascending by date.
    ///
    /// Both stores are queried concurrently. On dates present in both, the
    /// live record replaces the archived one wholesale.
    ///
    /// # Errors
    /// - `NotFound` if neither store holds any bars for the symbol.
    /// - `Store` if either store fails; a store failure is never papered over
    ///   with the other store's data.
    pub async fn history(&self, symbol: &str) -> Result<Vec<DailyBar>, BazarError> {
        let (archive, live) = tokio::join!(
            self.archive.bars_for_symbol(symbol),
            self.live.bars_for_symbol(symbol),
        );
        let archive = archive?;
        let live = live?;

        if archive.is_empty() && live.is_empty() {
            return Err(BazarError::not_found(format!("history for {symbol}")));
        }

        debug!(
            symbol,
            archive_bars = archive.len(),
            live_bars = live.len(),
            "merging history"
        );
        Ok(merge_daily_series(archive, live))
    }

    /// The merged history for `symbol`, clipped to the trailing `days`
    /// calendar days.
    ///
    /// The window is anchored at the most recent bar's date; sessions the
    /// market skipped leave gaps rather than padding.
    ///
    /// # Errors
    /// Same as [`Bazar::history`].
    pub async fn history_last_days(
        &self,
        symbol: &str,
        days: usize,
    ) -> Result<Vec<DailyBar>, BazarError> {
        let merged = self.history(symbol).await?;
        Ok(clip_trailing_days(merged, days))
    }
}
