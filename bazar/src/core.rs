use std::sync::Arc;

use bazar_core::{ArchiveStore, BazarError, LiveStore};

/// Reconciliation engine over the archive and live stores.
///
/// Reads from both stores, merges the per-symbol series with live-wins
/// semantics, and exposes catalog, comparison, and search views. The engine
/// never writes; ingestion goes through [`crate::ingest::CsvImporter`].
pub struct Bazar {
    pub(crate) archive: Arc<dyn ArchiveStore>,
    pub(crate) live: Arc<dyn LiveStore>,
}

impl std::fmt::Debug for Bazar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bazar").finish_non_exhaustive()
    }
}

/// Builder for constructing a `Bazar` engine over concrete stores.
pub struct BazarBuilder {
    archive: Option<Arc<dyn ArchiveStore>>,
    live: Option<Arc<dyn LiveStore>>,
}

impl Default for BazarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BazarBuilder {
    /// Create a new builder with no stores attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            archive: None,
            live: None,
        }
    }

    /// Attach the archive store.
    #[must_use]
    pub fn with_archive(mut self, store: Arc<dyn ArchiveStore>) -> Self {
        self.archive = Some(store);
        self
    }

    /// Attach the live store.
    #[must_use]
    pub fn with_live(mut self, store: Arc<dyn LiveStore>) -> Self {
        self.live = Some(store);
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    /// Returns `InvalidArg` if either store is missing; the engine's merge
    /// semantics are meaningless with only one source attached.
    pub fn build(self) -> Result<Bazar, BazarError> {
        let archive = self
            .archive
            .ok_or_else(|| BazarError::invalid_arg("no archive store configured"))?;
        let live = self
            .live
            .ok_or_else(|| BazarError::invalid_arg("no live store configured"))?;
        Ok(Bazar { archive, live })
    }
}

impl Bazar {
    /// Start building an engine.
    #[must_use]
    pub fn builder() -> BazarBuilder {
        BazarBuilder::new()
    }
}
