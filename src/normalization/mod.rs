//! Never-failing field parsers used by the CSV importer.
//!
//! Every function here returns a usable value for any input; malformed text
//! degrades to a default instead of rejecting the row.

pub mod canonical_url;
pub mod category;
pub mod price;

pub use canonical_url::normalize_url;
pub use category::{parse_category, parse_subcategory, DEFAULT_CATEGORY};
pub use price::parse_price;
