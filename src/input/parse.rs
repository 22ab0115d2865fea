/// Parse a user-entered raw score, treating anything unusable as 0.
///
/// Leading whitespace and an optional `+` are skipped, then the leading run of
/// decimal digits is read. Trailing text is ignored, so `"7.5"` is 7 and
/// `"12abc"` is 12. Empty, non-numeric and negative input all give 0. Values
/// too large for `u32` saturate.
pub fn parse_non_negative_int_or_zero(text: &str) -> u32 {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    digits
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d))
}
