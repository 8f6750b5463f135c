use bazar_core::BazarError;

use crate::Bazar;

/// Search results are capped so a short query cannot return the whole
/// catalog.
const SEARCH_LIMIT: usize = 10;

impl Bazar {
    /// Every symbol known to either store, sorted and deduplicated.
    ///
    /// # Errors
    /// `Store` if either store fails.
    pub async fn symbols(&self) -> Result<Vec<String>, BazarError> {
        let (archive, live) = tokio::join!(
            self.archive.distinct_symbols(),
            self.live.distinct_symbols(),
        );
        let mut symbols = archive?;
        symbols.extend(live?);
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }

    /// Case-insensitive substring search over the archive's symbols, capped
    /// at ten matches.
    ///
    /// An empty or whitespace-only query matches nothing. The live window is
    /// deliberately not searched: its symbol set is a subset of recent
    /// activity, not the catalog.
    ///
    /// # Errors
    /// `Store` if the archive fails.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, BazarError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<String> = self
            .archive
            .distinct_symbols()
            .await?
            .into_iter()
            .filter(|s| s.to_lowercase().contains(&needle))
            .collect();
        matches.sort();
        matches.truncate(SEARCH_LIMIT);
        Ok(matches)
    }
}
