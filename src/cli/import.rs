use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::database_ops::csv_import::{run_import, ImportConfig};
use crate::models::ImportSummary;

/// Command-line overrides layered on top of [`ImportConfig::from_env`].
#[derive(Debug, Clone, Default)]
pub struct ImportArgs {
    pub csv_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub vendor_id: Option<String>,
    pub dry_run: bool,
    /// Print the summary as JSON instead of text.
    pub json: bool,
}

impl ImportArgs {
    pub fn resolve(&self) -> ImportConfig {
        let env_cfg = ImportConfig::from_env();
        ImportConfig {
            csv_path: self.csv_path.clone().unwrap_or(env_cfg.csv_path),
            snapshot_path: self.snapshot_path.clone().unwrap_or(env_cfg.snapshot_path),
            vendor_id: self.vendor_id.clone().unwrap_or(env_cfg.vendor_id),
            dry_run: self.dry_run || env_cfg.dry_run,
        }
    }
}

pub fn run(args: ImportArgs) -> Result<ImportSummary> {
    let cfg = args.resolve();
    let summary = run_import(&cfg)
        .with_context(|| format!("importing {}", cfg.csv_path.display()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary, cfg.dry_run));
    }
    Ok(summary)
}

pub fn render_summary(s: &ImportSummary, dry_run: bool) -> String {
    let mut out = String::from("Import complete");
    if dry_run {
        out.push_str(" (dry run, snapshot not written)");
    }
    out.push('\n');
    out.push_str(&format!("  processed: {}\n", s.total_processed));
    out.push_str(&format!("  new:       {}\n", s.new_products));
    out.push_str(&format!("  updated:   {}\n", s.updated_products));
    out.push_str(&format!("  skipped:   {}\n", s.skipped_products));
    out.push_str(&format!("  errors:    {}\n", s.errors));
    out.push_str(&format!("  total demos in catalog: {}", s.total_demos));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_override_environment() {
        let args = ImportArgs {
            csv_path: Some("in.csv".into()),
            snapshot_path: Some("out/demos.json".into()),
            vendor_id: Some("partner-x".into()),
            dry_run: true,
            json: false,
        };
        let cfg = args.resolve();
        assert_eq!(cfg.csv_path, PathBuf::from("in.csv"));
        assert_eq!(cfg.snapshot_path, PathBuf::from("out/demos.json"));
        assert_eq!(cfg.vendor_id, "partner-x");
        assert!(cfg.dry_run);
    }

    #[test]
    fn summary_text_lists_every_tally() {
        let s = ImportSummary {
            total_processed: 5,
            new_products: 2,
            updated_products: 1,
            skipped_products: 1,
            errors: 1,
            total_demos: 9,
        };
        let text = render_summary(&s, true);
        assert!(text.starts_with("Import complete (dry run"));
        assert!(text.contains("processed: 5"));
        assert!(text.contains("errors:    1"));
        assert!(text.ends_with("total demos in catalog: 9"));
    }
}
