pub mod cli;
pub mod database_ops;
pub mod models;
pub mod normalization;

pub mod util {
    pub mod env;
    pub mod logging;
}

pub use database_ops::csv_import::{run_import, ImportConfig};
pub use models::{Demo, ImportSummary};
