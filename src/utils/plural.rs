//! Pluralization for log messages.

/// `"s"` unless `n == 1`.
///
/// - `plural_s(0)` -> `"s"` (0 assets)
/// - `plural_s(1)` -> `""` (1 asset)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Count followed by a regular noun: `plural_count(3, "asset")` -> `"3 assets"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

/// Count followed by an irregular noun.
///
/// `plural_noun(2, "strategy", "strategies")` -> `"2 strategies"`
#[inline]
pub fn plural_noun(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}
