use bazar_core::{BazarError, SymbolSnapshot};
use tracing::debug;

use crate::Bazar;

impl Bazar {
    /// Most-recent-date snapshots for `symbols`, in the order given.
    ///
    /// Reads the archive only: the live window is too short to guarantee
    /// every requested symbol has a row, and mixing planes would make the
    /// snapshots incomparable. Symbols with no archived bars are omitted
    /// rather than erroring, so one unknown ticker does not sink the whole
    /// comparison.
    ///
    /// # Errors
    /// - `InvalidArg` if `symbols` is empty.
    /// - `Store` if the archive fails.
    pub async fn compare(&self, symbols: &[String]) -> Result<Vec<SymbolSnapshot>, BazarError> {
        if symbols.is_empty() {
            return Err(BazarError::invalid_arg("no symbols to compare"));
        }

        let mut snapshots = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let mut bars = self.archive.bars_for_symbol(symbol).await?;
            if bars.is_empty() {
                debug!(symbol, "no archived bars; omitting from comparison");
                continue;
            }
            bars.sort_by_key(bazar_core::DailyBar::date);
            if let Some(latest) = bars.last() {
                snapshots.push(SymbolSnapshot::from_latest(latest));
            }
        }
        Ok(snapshots)
    }
}
