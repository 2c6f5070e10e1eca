pub mod catalog;
pub mod csv_import;
pub mod error;
pub mod repository;
pub mod snapshot;

pub use error::{ImportError, RepositoryError, RowError};
pub use repository::{DemoRepository, MemoryDemoRepository};
pub use snapshot::{Snapshot, SnapshotStore};
