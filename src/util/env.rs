//! Environment helpers: centralized dotenv loading and ergonomic getters.
//! Call `init_env()` once early in each binary (or rely on lazy Once).
use std::str::FromStr;
use std::sync::Once;
use tracing::info;

static INIT: Once = Once::new();

/// Configuration keys surfaced in the startup snapshot.
pub const DEMO_ENV_KEYS: [&str; 4] = [
    "DEMO_CSV_PATH",
    "DEMO_SNAPSHOT_PATH",
    "DEMO_VENDOR_ID",
    "DEMO_IMPORT_DRY_RUN",
];

/// Load .env exactly once. Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Common bootstrap for CLI binaries: load .env and log which demo settings
/// come from the environment.
pub fn bootstrap_cli(bin_name: &str) {
    init_env();
    let snapshot: Vec<(&str, String)> = DEMO_ENV_KEYS
        .iter()
        .map(|&k| (k, env_opt(k).unwrap_or_else(|| "<default>".into())))
        .collect();
    info!(target = "bootstrap", bin = bin_name, config = ?snapshot, "configuration snapshot");
}

/// Get optional env var (None if unset or empty).
pub fn env_opt(key: &str) -> Option<String> {
    init_env();
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Get parsed value with default fallback.
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    init_env();
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Boolean flag; accepts 1/true/on/yes (case-insensitive) as true.
pub fn env_flag(key: &str, default: bool) -> bool {
    init_env();
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> bool {
    let v = raw.trim().to_ascii_lowercase();
    matches!(v.as_str(), "1" | "true" | "on" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_spellings() {
        for yes in ["1", "true", "TRUE", " on ", "Yes"] {
            assert!(parse_flag(yes), "{yes}");
        }
        for no in ["0", "false", "off", "", "maybe"] {
            assert!(!parse_flag(no), "{no}");
        }
    }

    #[test]
    fn unset_keys_fall_back() {
        let key = "DEMO_CATALOG_TEST_SURELY_UNSET_KEY";
        assert_eq!(env_opt(key), None);
        assert_eq!(env_parse(key, 42usize), 42);
        assert!(env_flag(key, true));
    }
}
