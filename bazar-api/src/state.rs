use std::path::PathBuf;
use std::sync::Arc;

use bazar::Bazar;
use bazar::ingest::CsvImporter;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The reconciliation engine.
    pub bazar: Arc<Bazar>,
    /// Importer used by `POST /import-csv`.
    pub importer: Arc<CsvImporter>,
    /// Folder the import endpoint scans for batch files.
    pub import_dir: PathBuf,
}

impl AppState {
    /// Bundle the engine, importer, and import folder.
    #[must_use]
    pub fn new(bazar: Arc<Bazar>, importer: Arc<CsvImporter>, import_dir: PathBuf) -> Self {
        Self {
            bazar,
            importer,
            import_dir,
        }
    }
}
