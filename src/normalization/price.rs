/// Parse a loosely formatted price ("19,99", "$ 12.50", "1.234,56 EUR").
///
/// Everything except digits, `.` and `,` is dropped, the first `,` becomes a
/// decimal point, and the longest leading decimal number is read. Returns
/// `0.0` when nothing numeric remains, so the result is never negative.
///
/// `"1.234,56"` reads as `1.234`: after the comma swap the text is
/// `"1.234.56"` and parsing stops at the second point.
pub fn parse_price(input: &str) -> f64 {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if kept.is_empty() {
        return 0.0;
    }
    let decimal = kept.replacen(',', ".", 1);
    leading_decimal(&decimal)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// Longest prefix of the form `digits[.digits]`; None if it has no digit.
fn leading_decimal(s: &str) -> Option<&str> {
    let mut seen_point = false;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        match c {
            '0'..='9' => end = idx + 1,
            '.' if !seen_point => {
                seen_point = true;
                end = idx + 1;
            }
            _ => break,
        }
    }
    let prefix = s[..end].trim_end_matches('.');
    if prefix.chars().any(|c| c.is_ascii_digit()) {
        Some(prefix)
    } else {
        None
    }
}
