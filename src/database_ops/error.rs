use std::path::PathBuf;

use thiserror::Error;

/// Run-level failures. Any of these aborts the import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("csv source {path} not found")]
    CsvMissing { path: PathBuf },

    #[error("failed to read csv source {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to create snapshot directory {path}: {source}")]
    SnapshotDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A repository refused a single record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("demo record has an empty id")]
    MissingId,
    #[error("demo {id} has an empty normalized url")]
    MissingNormalizedUrl { id: String },
}

/// Per-row failure; counted in the run summary, never fatal.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("undecodable csv record: {0}")]
    Decode(#[from] csv::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
