//! Pluralization helpers for build summaries.

/// `"s"` unless `n == 1`.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `plural_count(1, "page")` -> `"1 page"`, `plural_count(3, "unit")` -> `"3 units"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "page"), "0 pages");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(7, "unit"), "7 units");
    }
}
