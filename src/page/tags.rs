//! Tag string parsing.

/// Split a page's raw tag field into individual tags.
///
/// Tags are comma separated. Older pages used semicolons instead, and any
/// semicolon in the string switches to that format. Without a delimiter the
/// whole trimmed string is the one tag, even when that leaves it blank.
/// Otherwise blank entries are dropped, everything else is trimmed and kept
/// in order, duplicates included.
pub fn tags_to_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let delimiter = if raw.contains(';') { ';' } else { ',' };

    if !raw.contains(delimiter) {
        return vec![raw.trim().to_string()];
    }

    raw.split(delimiter)
        .filter(|part| *part != "," && !part.trim().is_empty())
        .map(|part| part.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        assert_eq!(tags_to_list("tag1, tag2, tag3"), vec!["tag1", "tag2", "tag3"]);
    }

    #[test]
    fn test_legacy_semicolon_separated() {
        assert_eq!(tags_to_list("a;b;c"), vec!["a", "b", "c"]);
        assert_eq!(tags_to_list("a, b;c"), vec!["a, b", "c"]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(tags_to_list("").is_empty());
        assert_eq!(tags_to_list("single"), vec!["single"]);
        assert_eq!(tags_to_list("  single  "), vec!["single"]);
    }

    #[test]
    fn test_blank_single_tag_kept() {
        assert_eq!(tags_to_list("   "), vec![""]);
    }

    #[test]
    fn test_blank_entries_dropped() {
        assert_eq!(tags_to_list(",a,, ,b,"), vec!["a", "b"]);
        assert_eq!(tags_to_list(";;x; ;"), vec!["x"]);
    }

    #[test]
    fn test_duplicates_and_order_kept() {
        assert_eq!(
            tags_to_list("rust, wiki, rust, docs"),
            vec!["rust", "wiki", "rust", "docs"]
        );
    }

    #[test]
    fn test_inner_whitespace_kept() {
        assert_eq!(
            tags_to_list("facebook data leak, privacy"),
            vec!["facebook data leak", "privacy"]
        );
    }
}
