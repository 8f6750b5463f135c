use thiserror::Error;

/// Unified error type for the bazar workspace.
///
/// This wraps batch-file validation failures, duplicate-key outcomes of the
/// plain-insert ingestion variant, storage-layer failures tagged with the
/// store they came from, and the not-found condition the reconciler raises
/// when neither source holds data for a symbol.
#[derive(Debug, Error)]
pub enum BazarError {
    /// A batch filename does not encode a real calendar date.
    ///
    /// The ingestion pipeline skips the file and continues with the next one.
    #[error("invalid batch date in filename: {name}")]
    InvalidFilenameDate {
        /// The offending filename (without extension).
        name: String,
    },

    /// A plain insert collided with an existing `(symbol, date)` key.
    ///
    /// Re-running an ingestion job over already-imported batches is expected;
    /// the pipeline treats this as a silent skip, not a fault.
    #[error("duplicate key: {key}")]
    DuplicateKey {
        /// Human-readable description of the colliding key.
        key: String,
    },

    /// A batch file could not be read or was structurally broken CSV.
    #[error("batch {file}: {msg}")]
    BatchRead {
        /// The batch file the failure belongs to.
        file: String,
        /// Underlying I/O or CSV error message.
        msg: String,
    },

    /// The storage layer failed during a read or write.
    ///
    /// Fatal for the current operation; propagated unmodified with the
    /// identity of the store that failed.
    #[error("{store} store failed: {msg}")]
    Store {
        /// Which store failed ("archive" or "live").
        store: &'static str,
        /// Human-readable error message from the backend.
        msg: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// No data exists for the requested symbol in any source.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "history for ADBL".
        what: String,
    },
}

impl BazarError {
    /// Helper: build an `InvalidFilenameDate` error for a filename stem.
    pub fn invalid_filename_date(name: impl Into<String>) -> Self {
        Self::InvalidFilenameDate { name: name.into() }
    }

    /// Helper: build a `DuplicateKey` error for a colliding key description.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Helper: build a `BatchRead` error for a batch file and message.
    pub fn batch_read(file: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::BatchRead {
            file: file.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Store` error tagged with the failing store.
    pub fn store(store: &'static str, msg: impl Into<String>) -> Self {
        Self::Store {
            store,
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `InvalidArg` error from a message.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }
}
