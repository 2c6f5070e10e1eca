use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use demo_catalog::cli::{self, catalog::ListConfig, import::ImportArgs};
use demo_catalog::database_ops::catalog::DemoFilter;
use demo_catalog::models::DemoStatus;
use demo_catalog::util::{env, logging};

#[derive(Parser, Debug)]
#[command(name = "demo-catalog", version, about = "Demo catalog admin CLI")]
struct Cli {
    /// Log per-row insert/update/skip events
    #[arg(long, short, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Import a semicolon-delimited CSV into the demo snapshot
    Import {
        /// CSV file (defaults to DEMO_CSV_PATH or data/products.csv)
        csv: Option<PathBuf>,
        #[command(flatten)]
        snapshot: SnapshotArg,
        /// vendorId written on newly created demos
        #[arg(long)]
        vendor_id: Option<String>,
        /// Process the file without writing the snapshot
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
        /// Print the summary as JSON
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// List demos in the snapshot
    List {
        #[command(flatten)]
        snapshot: SnapshotArg,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        /// active | inactive | archived
        #[arg(long)]
        status: Option<DemoStatus>,
        /// Case-insensitive match on title, description or url
        #[arg(long)]
        search: Option<String>,
        /// Maximum rows (defaults to DEMO_LIST_LIMIT or 50)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Per-category demo counts
    Stats {
        #[command(flatten)]
        snapshot: SnapshotArg,
    },
    /// Remove one demo by id
    Remove {
        id: String,
        #[command(flatten)]
        snapshot: SnapshotArg,
    },
    /// Print the canonical dedup key for each URL
    NormalizeUrl {
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct SnapshotArg {
    /// Snapshot JSON (defaults to DEMO_SNAPSHOT_PATH or data/demos.json)
    #[arg(long = "snapshot")]
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env::init_env();
    logging::init_tracing(if args.verbose { "debug" } else { "info" })?;
    env::bootstrap_cli("demo-catalog");

    match args.command {
        Commands::Import {
            csv,
            snapshot,
            vendor_id,
            dry_run,
            json,
        } => {
            cli::import::run(ImportArgs {
                csv_path: csv,
                snapshot_path: snapshot.path,
                vendor_id,
                dry_run,
                json,
            })?;
        }
        Commands::List {
            snapshot,
            category,
            subcategory,
            status,
            search,
            limit,
            json,
        } => cli::catalog::list(ListConfig {
            snapshot_path: snapshot.path,
            filter: DemoFilter {
                category,
                subcategory,
                status,
                search,
                limit,
            },
            json,
        })?,
        Commands::Stats { snapshot } => cli::catalog::stats(snapshot.path)?,
        Commands::Remove { id, snapshot } => cli::catalog::remove(snapshot.path, &id)?,
        Commands::NormalizeUrl { urls } => cli::catalog::normalize_urls(&urls),
    }
    Ok(())
}
