//! Read-mostly snapshot commands: list, stats, remove, normalize-url.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::info;

use crate::database_ops::catalog::{category_counts, list_demos, DemoFilter};
use crate::database_ops::csv_import::ImportConfig;
use crate::database_ops::repository::{DemoRepository, MemoryDemoRepository};
use crate::database_ops::snapshot::SnapshotStore;
use crate::models::Demo;
use crate::normalization::normalize_url;
use crate::util::env::env_parse;

/// Row cap for `list` when `--limit` is not given.
pub const DEFAULT_LIST_LIMIT: usize = 50;

fn open_repo(snapshot_path: Option<PathBuf>) -> (SnapshotStore, MemoryDemoRepository, Vec<Value>) {
    let path = snapshot_path.unwrap_or_else(|| ImportConfig::from_env().snapshot_path);
    let store = SnapshotStore::new(path);
    let snapshot = store.load();
    let repo = MemoryDemoRepository::from(snapshot.demos);
    (store, repo, snapshot.unrecognized)
}

#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    pub snapshot_path: Option<PathBuf>,
    pub filter: DemoFilter,
    pub json: bool,
}

pub fn list(mut cfg: ListConfig) -> Result<()> {
    let (_, repo, _) = open_repo(cfg.snapshot_path.take());
    if cfg.filter.limit.is_none() {
        cfg.filter.limit = Some(env_parse("DEMO_LIST_LIMIT", DEFAULT_LIST_LIMIT));
    }
    let demos = list_demos(&repo, &cfg.filter);
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&demos)?);
        return Ok(());
    }
    for demo in &demos {
        println!("{}", render_line(demo));
    }
    println!("{} of {} demos shown", demos.len(), repo.len());
    Ok(())
}

fn render_line(demo: &Demo) -> String {
    let category = match &demo.subcategory {
        Some(sub) => format!("{} > {}", demo.category, sub),
        None => demo.category.clone(),
    };
    format!(
        "{}  [{}]  {}  ({})  {}",
        demo.id,
        demo.status.as_str(),
        demo.title,
        category,
        demo.url
    )
}

pub fn stats(snapshot_path: Option<PathBuf>) -> Result<()> {
    let (store, repo, _) = open_repo(snapshot_path);
    println!("snapshot: {}", store.path().display());
    for (category, count) in category_counts(&repo) {
        println!("  {category:<24} {count}");
    }
    println!("  {:<24} {}", "total", repo.len());
    Ok(())
}

/// Delete one demo by id and rewrite the snapshot.
pub fn remove(snapshot_path: Option<PathBuf>, id: &str) -> Result<()> {
    let (store, mut repo, unrecognized) = open_repo(snapshot_path);
    if !repo.delete(id)? {
        bail!("no demo with id {id} in {}", store.path().display());
    }
    store
        .save(repo.as_slice(), &unrecognized)
        .with_context(|| format!("rewriting {}", store.path().display()))?;
    info!(%id, remaining = repo.len(), "demo removed");
    println!("removed {id}");
    Ok(())
}

pub fn normalize_urls(urls: &[String]) {
    for url in urls {
        println!("{}\t{}", url, normalize_url(url));
    }
}
