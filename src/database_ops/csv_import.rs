//! Semicolon CSV import: parse each row, match it against known demos by
//! canonical URL, then update in place or insert.
//!
//! One synchronous pass over the file. Row-level problems are counted in the
//! summary and never stop the run; failing to read the CSV or to write the
//! snapshot does. Two runs against the same snapshot must not overlap (last
//! writer wins).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database_ops::error::{ImportError, RepositoryError, RowError};
use crate::database_ops::repository::{DemoRepository, MemoryDemoRepository};
use crate::database_ops::snapshot::SnapshotStore;
use crate::models::{
    CsvRow, Demo, DemoMetadata, DemoStatus, ImportSummary, ParsedProduct, CSV_IMPORT_SOURCE,
};
use crate::normalization::{normalize_url, parse_category, parse_price, parse_subcategory};
use crate::util::env::{env_flag, env_opt};

pub const DEFAULT_CSV_PATH: &str = "data/products.csv";
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/demos.json";
pub const DEFAULT_VENDOR_ID: &str = "csv-import";

const CSV_DELIMITER: u8 = b';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub csv_path: PathBuf,
    pub snapshot_path: PathBuf,
    /// Tag written to `vendorId` on inserted demos.
    pub vendor_id: String,
    /// Compute the summary without writing the snapshot.
    pub dry_run: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_PATH.into(),
            snapshot_path: DEFAULT_SNAPSHOT_PATH.into(),
            vendor_id: DEFAULT_VENDOR_ID.into(),
            dry_run: false,
        }
    }
}

impl ImportConfig {
    /// DEMO_CSV_PATH, DEMO_SNAPSHOT_PATH, DEMO_VENDOR_ID, DEMO_IMPORT_DRY_RUN.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            csv_path: env_opt("DEMO_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
            snapshot_path: env_opt("DEMO_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            vendor_id: env_opt("DEMO_VENDOR_ID")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.vendor_id),
            dry_run: env_flag("DEMO_IMPORT_DRY_RUN", false),
        }
    }
}

/// Turn a raw row into a product, or `None` when `title` or `demoUrl` is blank.
pub fn build_product(row: &CsvRow) -> Option<ParsedProduct> {
    let title = row.title.trim();
    let demo_url = row.demo_url.trim();
    if title.is_empty() || demo_url.is_empty() {
        return None;
    }
    let sale_price = parse_price(&row.sale_price);
    Some(ParsedProduct {
        sku: row.sku.trim().to_string(),
        title: title.to_string(),
        regular_price: parse_price(&row.regular_price),
        sale_price: (sale_price > 0.0).then_some(sale_price),
        demo_url: demo_url.to_string(),
        category: parse_category(&row.category),
        subcategory: parse_subcategory(&row.category),
        image_url: row.image_url.trim().to_string(),
        description: row.description.trim().to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted { id: String },
    Updated { id: String },
}

/// Applies parsed products to a [`DemoRepository`].
#[derive(Debug, Clone)]
pub struct DemoImporter {
    vendor_id: String,
}

impl DemoImporter {
    pub fn new(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
        }
    }

    /// Upsert one product keyed by canonical URL (raw URL as fallback).
    pub fn apply<R: DemoRepository>(
        &self,
        repo: &mut R,
        product: &ParsedProduct,
        now: DateTime<Utc>,
    ) -> Result<RowOutcome, RepositoryError> {
        let normalized = normalize_url(&product.demo_url);
        match repo.find_by_url(&normalized, &product.demo_url) {
            Some(mut existing) => {
                merge_into(&mut existing, product, now);
                let id = existing.id.clone();
                repo.upsert(existing)?;
                Ok(RowOutcome::Updated { id })
            }
            None => {
                let id = fresh_id(repo);
                let demo = self.new_demo(id.clone(), product, normalized, now);
                repo.upsert(demo)?;
                Ok(RowOutcome::Inserted { id })
            }
        }
    }

    /// Run every record of `reader` through [`Self::apply`].
    ///
    /// Only an I/O failure of the underlying reader is returned as an error;
    /// undecodable records and repository rejections are counted.
    pub fn import_reader<R, Rd>(&self, reader: Rd, repo: &mut R) -> Result<ImportSummary, csv::Error>
    where
        R: DemoRepository,
        Rd: Read,
    {
        let mut rdr = ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut summary = ImportSummary::default();
        let mut record = StringRecord::new();
        loop {
            let line = rdr.position().line();
            let read = match rdr.read_record(&mut record) {
                Ok(read) => Ok(read),
                Err(e) if e.is_io_error() => return Err(e),
                Err(e) => Err(RowError::from(e)),
            };
            let result = match read {
                Ok(false) => break,
                Ok(true) => {
                    summary.total_processed += 1;
                    let row = CsvRow::from_fields(record.iter());
                    match build_product(&row) {
                        None => {
                            debug!(line, sku = %row.sku, "skipping row without title or demo url");
                            summary.skipped_products += 1;
                            continue;
                        }
                        Some(product) => self
                            .apply(repo, &product, Utc::now())
                            .map(|outcome| (outcome, product))
                            .map_err(RowError::from),
                    }
                }
                Err(e) => {
                    summary.total_processed += 1;
                    Err(e)
                }
            };

            match result {
                Ok((RowOutcome::Inserted { id }, product)) => {
                    debug!(line, %id, title = %product.title, "inserted demo");
                    summary.new_products += 1;
                }
                Ok((RowOutcome::Updated { id }, product)) => {
                    debug!(line, %id, title = %product.title, "updated demo");
                    summary.updated_products += 1;
                }
                Err(e) => {
                    warn!(line, error = %e, "row failed; continuing");
                    summary.errors += 1;
                }
            }
        }

        summary.total_demos = repo.len();
        Ok(summary)
    }

    fn new_demo(
        &self,
        id: String,
        product: &ParsedProduct,
        normalized_url: String,
        now: DateTime<Utc>,
    ) -> Demo {
        Demo {
            id,
            title: product.title.clone(),
            description: product.description.clone(),
            url: product.demo_url.clone(),
            normalized_url,
            category: product.category.clone(),
            subcategory: product.subcategory.clone(),
            image_url: product.image_url.clone(),
            status: DemoStatus::Active,
            vendor_id: self.vendor_id.clone(),
            metadata: DemoMetadata {
                sku: product.sku.clone(),
                regular_price: product.regular_price,
                sale_price: product.sale_price,
                source: Some(CSV_IMPORT_SOURCE.to_string()),
                imported_at: Some(now),
                ..DemoMetadata::default()
            },
            created_at: now,
            updated_at: now,
        }
    }
}

// Identity fields (id, createdAt, url, normalizedUrl, status, vendorId) stay put.
fn merge_into(demo: &mut Demo, product: &ParsedProduct, now: DateTime<Utc>) {
    demo.title = product.title.clone();
    demo.category = product.category.clone();
    demo.subcategory = product.subcategory.clone();
    if !product.image_url.is_empty() {
        demo.image_url = product.image_url.clone();
    }
    if !product.description.is_empty() {
        demo.description = product.description.clone();
    }
    demo.metadata.sku = product.sku.clone();
    demo.metadata.regular_price = product.regular_price;
    demo.metadata.sale_price = product.sale_price;
    demo.metadata.last_updated_at = Some(now);
    demo.updated_at = now;
}

fn fresh_id<R: DemoRepository>(repo: &R) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if repo.get(&id).is_none() {
            return id;
        }
    }
}

/// Full run: load the snapshot, import the CSV, write the snapshot back.
pub fn run_import(cfg: &ImportConfig) -> Result<ImportSummary, ImportError> {
    if !cfg.csv_path.is_file() {
        return Err(ImportError::CsvMissing {
            path: cfg.csv_path.clone(),
        });
    }
    let file = File::open(&cfg.csv_path).map_err(|e| ImportError::CsvRead {
        path: cfg.csv_path.clone(),
        source: e.into(),
    })?;

    let store = SnapshotStore::new(&cfg.snapshot_path);
    let snapshot = store.load();
    let mut repo = MemoryDemoRepository::from(snapshot.demos);
    let existing = repo.len();
    info!(
        csv = %cfg.csv_path.display(),
        snapshot = %store.path().display(),
        existing,
        dry_run = cfg.dry_run,
        "starting demo import"
    );

    let importer = DemoImporter::new(cfg.vendor_id.clone());
    let summary = importer
        .import_reader(BufReader::new(file), &mut repo)
        .map_err(|source| ImportError::CsvRead {
            path: cfg.csv_path.clone(),
            source,
        })?;

    if cfg.dry_run {
        info!("dry run; snapshot left untouched");
    } else {
        store.save(repo.as_slice(), &snapshot.unrecognized)?;
    }
    info!(
        total_processed = summary.total_processed,
        new = summary.new_products,
        updated = summary.updated_products,
        skipped = summary.skipped_products,
        errors = summary.errors,
        total_demos = summary.total_demos,
        "demo import finished"
    );
    Ok(summary)
}
