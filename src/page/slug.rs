//! Search-engine friendly page slugs.

use std::sync::LazyLock;

use regex::Regex;

/// Longest slug produced, counted in characters before hyphenation.
pub const MAX_SLUG_CHARS: usize = 75;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\d\s-]").expect("valid regex"));
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").expect("valid regex"));

/// Turn a page title into a URL-safe slug.
///
/// Case is preserved and Unicode letters are kept:
/// "Hello, World! 2024" -> "Hello-World-2024"
pub fn slugify(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let cleaned = INVALID_CHARS.replace_all(title, "");
    let collapsed = SEPARATOR_RUNS.replace_all(&cleaned, " ");
    let collapsed = collapsed.trim();

    let truncated = match collapsed.char_indices().nth(MAX_SLUG_CHARS) {
        Some((end, _)) => collapsed[..end].trim_end(),
        None => collapsed,
    };

    WHITESPACE.replace_all(truncated, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World! 2024"), "Hello-World-2024");
        assert_eq!(slugify("What's New?"), "Whats-New");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(slugify("  a -- b \t\n c  "), "a-b-c");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_unicode_words_are_kept() {
        assert_eq!(slugify("Café à Paris"), "Café-à-Paris");
        assert_eq!(slugify("日本語 ページ"), "日本語-ページ");
    }

    #[test]
    fn test_long_title_is_truncated() {
        let title = "word ".repeat(20);
        assert_eq!(title.trim().chars().count(), 99);

        let slug = slugify(&title);

        assert!(slug.chars().count() <= MAX_SLUG_CHARS);
        assert!(!slug.ends_with('-'));
        assert_eq!(slug, "word-".repeat(15).trim_end_matches('-'));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let title = "é".repeat(100);

        assert_eq!(slugify(&title), "é".repeat(MAX_SLUG_CHARS));
    }

    #[test]
    fn test_deterministic() {
        let title = "Release Notes: v1.2 (beta)";
        assert_eq!(slugify(title), slugify(title));
        assert_eq!(slugify(title), "Release-Notes-v12-beta");
    }
}
