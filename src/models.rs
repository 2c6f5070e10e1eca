//! Catalog record types: raw CSV rows, parsed products, persisted demos and
//! the import run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalization::DEFAULT_CATEGORY;

/// `metadata.source` tag stamped on every record created by the CSV importer.
pub const CSV_IMPORT_SOURCE: &str = "csv_import";

/// One positional CSV line: `sku;title;regularPrice;salePrice;demoUrl;category;imageUrl;description`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    pub sku: String,
    pub title: String,
    pub regular_price: String,
    pub sale_price: String,
    pub demo_url: String,
    pub category: String,
    pub image_url: String,
    pub description: String,
}

impl CsvRow {
    /// Build a row from positional fields; missing trailing columns read as empty.
    ///
    /// Quotes carry no meaning to the reader, so a `;` inside the last column
    /// splits it. Every field past the seventh is joined back into
    /// `description`. A field wrapped in one pair of double quotes is unwrapped
    /// and `""` inside it reads as `"`.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut it = fields.into_iter();
        let mut next = || unquote(it.next().unwrap_or_default());
        let sku = next();
        let title = next();
        let regular_price = next();
        let sale_price = next();
        let demo_url = next();
        let category = next();
        let image_url = next();
        let description = unquote(&it.collect::<Vec<_>>().join(";"));
        Self {
            sku,
            title,
            regular_price,
            sale_price,
            demo_url,
            category,
            image_url,
            description,
        }
    }
}

fn unquote(field: &str) -> String {
    let trimmed = field.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => field.to_string(),
    }
}

/// Typed and cleaned form of a [`CsvRow`] that passed the required-field filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedProduct {
    pub sku: String,
    pub title: String,
    pub regular_price: f64,
    pub sale_price: Option<f64>,
    pub demo_url: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub image_url: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl DemoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoStatus::Active => "active",
            DemoStatus::Inactive => "inactive",
            DemoStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for DemoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(DemoStatus::Active),
            "inactive" => Ok(DemoStatus::Inactive),
            "archived" => Ok(DemoStatus::Archived),
            other => Err(format!("unknown demo status: {other}")),
        }
    }
}

/// Free-form metadata. Known keys are typed; anything else written by other
/// tools is carried through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoMetadata {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub regular_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A catalog entry as stored in the snapshot.
///
/// Only `id` and `url` are required on load. Records written by other tools
/// may omit the rest; an empty `normalizedUrl` is filled in by the snapshot
/// loader and missing timestamps read as the load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub normalized_url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub status: DemoStatus,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub metadata: DemoMetadata,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Outcome tallies of one import pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_processed: usize,
    pub new_products: usize,
    pub updated_products: usize,
    pub skipped_products: usize,
    pub errors: usize,
    pub total_demos: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_rows_default_missing_columns() {
        let row = CsvRow::from_fields(["SKU1", "Title"]);
        assert_eq!(row.sku, "SKU1");
        assert_eq!(row.title, "Title");
        assert!(row.demo_url.is_empty());
        assert!(row.description.is_empty());
    }

    #[test]
    fn extra_fields_fold_into_the_description() {
        let row = CsvRow::from_fields([
            "S1", "Title", "1", "", "https://q.test", "Blog", "", "\"Fast", " clean", " modern\"",
        ]);
        assert_eq!(row.description, "Fast; clean; modern");
        assert_eq!(row.image_url, "");
    }

    #[test]
    fn wrapping_quotes_are_removed() {
        let row = CsvRow::from_fields(["S1", "\"Say \"\"hi\"\"\"", "\"Unclosed"]);
        assert_eq!(row.title, "Say \"hi\"");
        assert_eq!(row.regular_price, "\"Unclosed");
    }

    #[test]
    fn demo_serializes_camel_case_and_omits_absent_fields() {
        let now = Utc::now();
        let demo = Demo {
            id: "abc".into(),
            title: "Shop".into(),
            description: String::new(),
            url: "https://example.com/shop".into(),
            normalized_url: "https://example.com/shop".into(),
            category: "Business".into(),
            subcategory: None,
            image_url: String::new(),
            status: DemoStatus::Active,
            vendor_id: "csv-import".into(),
            metadata: DemoMetadata {
                sku: "S1".into(),
                regular_price: 10.0,
                source: Some(CSV_IMPORT_SOURCE.into()),
                imported_at: Some(now),
                ..DemoMetadata::default()
            },
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(&demo).unwrap();
        assert_eq!(v["normalizedUrl"], "https://example.com/shop");
        assert_eq!(v["vendorId"], "csv-import");
        assert_eq!(v["status"], "active");
        assert_eq!(v["metadata"]["regularPrice"], 10.0);
        assert_eq!(v["metadata"]["source"], "csv_import");
        assert!(v.get("subcategory").is_none());
        assert!(v["metadata"].get("salePrice").is_none());
        assert!(v["metadata"].get("lastUpdatedAt").is_none());
    }

    #[test]
    fn unknown_metadata_keys_survive_a_load() {
        let raw = json!({
            "id": "1",
            "title": "Landing",
            "url": "https://a.com",
            "normalizedUrl": "https://a.com/",
            "category": "Other",
            "vendorId": "admin",
            "metadata": { "sku": "X", "regularPrice": 3.5, "featured": true },
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });
        let demo: Demo = serde_json::from_value(raw).unwrap();
        assert_eq!(demo.status, DemoStatus::Active);
        assert_eq!(demo.metadata.extra.get("featured"), Some(&json!(true)));
        let back = serde_json::to_value(&demo).unwrap();
        assert_eq!(back["metadata"]["featured"], true);
    }

    #[test]
    fn admin_records_with_only_id_and_url_load() {
        let demo: Demo =
            serde_json::from_value(json!({ "id": "admin1", "url": "https://admin.test/x" })).unwrap();
        assert_eq!(demo.category, DEFAULT_CATEGORY);
        assert!(demo.normalized_url.is_empty());
        assert!(demo.vendor_id.is_empty());
        assert!(serde_json::from_value::<Demo>(json!({ "id": "no-url" })).is_err());
    }

    #[test]
    fn summary_uses_camel_case_keys() {
        let summary = ImportSummary {
            total_processed: 3,
            new_products: 1,
            updated_products: 1,
            skipped_products: 1,
            errors: 0,
            total_demos: 4,
        };
        let v = serde_json::to_value(summary).unwrap();
        assert_eq!(v["totalProcessed"], 3);
        assert_eq!(v["skippedProducts"], 1);
        assert_eq!(v["totalDemos"], 4);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Archived".parse::<DemoStatus>(), Ok(DemoStatus::Archived));
        assert!("deleted".parse::<DemoStatus>().is_err());
    }
}
