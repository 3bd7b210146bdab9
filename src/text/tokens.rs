//! Custom token substitution.
//!
//! Authors can drop a handful of placeholder tokens into page markup. They
//! survive markdown conversion and sanitization as plain text and are
//! replaced with trusted HTML at the very end of the pipeline.

/// A placeholder token and the HTML it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomToken {
    pub token: &'static str,
    pub replacement: &'static str,
}

const fn token(token: &'static str, replacement: &'static str) -> CustomToken {
    CustomToken { token, replacement }
}

/// Navigation block emitted for `{{menu}}`.
pub const MENU_HTML: &str = concat!(
    r#"<div id="leftmenu"><ul>"#,
    r#"<li><a href="/">Main Page</a></li>"#,
    r#"<li><a href="/wiki/Special:AllPages">All pages</a></li>"#,
    r#"<li><a href="/wiki/Special:Categories">Categories</a></li>"#,
    r#"<li><a href="/wiki/Special:Random">Random page</a></li>"#,
    "</ul></div>",
);

/// The built-in token table.
///
/// No replacement contains the `{{` opening marker, so the order the table
/// is applied in does not matter.
pub const DEFAULT_TOKENS: &[CustomToken] = &[
    token("{{b}}", "<b>"),
    token("{{/b}}", "</b>"),
    token("{{br}}", r#"<br style="clear:both" />"#),
    token("{{menu}}", MENU_HTML),
    token(
        "{{wikipedia}}",
        r#"<a class="external-link wikipedia" rel="nofollow" target="_blank" href="https://en.wikipedia.org/">"#,
    ),
    token(
        "{{github}}",
        r#"<a class="external-link github" rel="nofollow" target="_blank" href="https://github.com/">"#,
    ),
    token("{{/link}}", "</a>"),
    token("{{head}}", "&lt;head&gt;"),
];

/// Replaces custom tokens in rendered HTML.
///
/// Built once and shared; the table is never modified after construction.
#[derive(Debug, Clone)]
pub struct CustomTokenParser {
    tokens: &'static [CustomToken],
}

impl CustomTokenParser {
    /// A parser over the built-in token table.
    pub fn new() -> Self {
        Self::with_tokens(DEFAULT_TOKENS)
    }

    /// A parser over a caller-supplied static table.
    pub fn with_tokens(tokens: &'static [CustomToken]) -> Self {
        Self { tokens }
    }

    /// Replace every occurrence of every token.
    pub fn replace_tokens_after_parse(&self, html: &str) -> String {
        if html.is_empty() || !html.contains("{{") {
            return html.to_string();
        }

        self.tokens
            .iter()
            .fold(html.to_string(), |acc, t| acc.replace(t.token, t.replacement))
    }
}

impl Default for CustomTokenParser {
    fn default() -> Self {
        Self::new()
    }
}
