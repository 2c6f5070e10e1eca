/// Category assigned when the CSV carries none.
pub const DEFAULT_CATEGORY: &str = "Other";

const SEPARATOR: char = '>';

/// Top-level segment of a `Parent>Child` category path.
pub fn parse_category(input: &str) -> String {
    let top = input.split(SEPARATOR).next().unwrap_or_default().trim();
    if top.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        top.to_string()
    }
}

/// Second segment of a `Parent>Child` path. Only two levels are kept.
pub fn parse_subcategory(input: &str) -> Option<String> {
    input
        .split(SEPARATOR)
        .nth(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
