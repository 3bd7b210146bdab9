//! HTML sanitization for rendered page content.
//!
//! The sanitizer starts from ammonia's baseline of safe tags, attributes and
//! URL schemes, then widens it with the configured [`WhitelistPolicy`].
//! A few rules are fixed and cannot be changed by the whitelist:
//!
//! - `class` and `id` are always allowed (heading anchors depend on `id`)
//! - `mailto:` links are always allowed
//! - `data-*` attributes never pass through
//! - `script` and `style` are never admitted, their content is always dropped
//! - an `href` containing `Special:` is kept verbatim on any element, so links
//!   into the wiki's special namespace (`Special:Tag`, `Special:Random`, ...)
//!   survive, unless its scheme runs script (`javascript:`, `vbscript:`,
//!   `data:`)

mod rewrite;
mod whitelist;

use std::borrow::Cow;

pub use whitelist::{WhitelistError, WhitelistPolicy, WhitelistRepository};

/// Marker that identifies links into the wiki's special namespace.
pub const SPECIAL_NAMESPACE: &str = "Special:";

/// Elements whose content ammonia always removes. Admitting them as tags as
/// well would make ammonia panic at clean time.
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

/// Decide whether an attribute the sanitizer would otherwise drop should be
/// kept. Arguments are the element name, attribute name and attribute value.
pub type KeepAttribute = fn(&str, &str, &str) -> bool;

/// Keep `href` values pointing into the special namespace.
///
/// `Special:` is matched case-sensitively; `special:foo` is dropped.
pub fn keep_special_links(_element: &str, attribute: &str, value: &str) -> bool {
    attribute.eq_ignore_ascii_case("href") && value.contains(SPECIAL_NAMESPACE)
}

/// URL schemes a kept `href` may never carry.
const SCRIPT_SCHEMES: &[&str] = &["javascript", "vbscript", "data"];

/// Name a kept `href` travels under while ammonia cleans the markup. It is
/// not a URL attribute to ammonia, so neither the scheme list nor the
/// per-element attribute lists can drop it.
const KEPT_HREF: &str = "wikirender-kept-href";

/// A ready-to-use HTML sanitizer.
///
/// Built once and shared between render requests; [`sanitize`](Self::sanitize)
/// only takes `&self`.
pub struct HtmlSanitizer {
    cleaner: ammonia::Builder<'static>,
    keep: KeepAttribute,
}

impl std::fmt::Debug for HtmlSanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlSanitizer").finish_non_exhaustive()
    }
}

impl HtmlSanitizer {
    /// Build a sanitizer from a whitelist policy using the default
    /// special-namespace keep rule.
    pub fn from_policy(policy: &WhitelistPolicy) -> Self {
        Self::with_keep_rule(policy, keep_special_links)
    }

    /// Build a sanitizer from a whitelist policy and a rule deciding which
    /// `href` values are kept verbatim, whatever the element and scheme.
    /// Script-running schemes are dropped regardless of the rule.
    pub fn with_keep_rule(policy: &WhitelistPolicy, keep: KeepAttribute) -> Self {
        let mut cleaner = ammonia::Builder::default();

        let tags = intern(policy.allowed_elements.iter().filter_map(|name| {
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            if CONTENT_STRIPPED_TAGS.contains(&name.as_str()) {
                tracing::warn!(element = %name, "refusing to whitelist element");
                return None;
            }
            Some(name)
        }));
        cleaner.add_tags(tags.iter().copied());

        let attributes = intern(policy.allowed_attributes.iter().filter_map(|name| {
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            if name.starts_with("data-") {
                tracing::warn!(attribute = %name, "data attributes are never whitelisted");
                return None;
            }
            Some(name)
        }));
        cleaner.add_generic_attributes(attributes.iter().copied());

        cleaner
            .add_generic_attributes(["class", "id", KEPT_HREF])
            .add_url_schemes(["mailto"])
            .link_rel(None)
            .attribute_filter(move |element, attribute, value| {
                // Also covers authors writing the marker attribute themselves.
                if attribute == KEPT_HREF && (runs_script(value) || !keep(element, "href", value)) {
                    return None;
                }
                Some(Cow::Borrowed(value))
            });

        Self { cleaner, keep }
    }

    /// Strip everything the policy doesn't allow.
    ///
    /// Sanitizing already sanitized output returns it unchanged.
    pub fn sanitize(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }
        let marked = rewrite::rename_attributes(html, |element, name, value| {
            (name.eq_ignore_ascii_case("href") && (self.keep)(element, "href", value))
                .then_some(KEPT_HREF)
        });
        let clean = self.cleaner.clean(&marked).to_string();
        let clean = rewrite::rename_attributes(&clean, |_, name, _| (name == KEPT_HREF).then_some("href"));

        rewrite::restore_leading_newlines(&clean)
    }
}

/// Builds the sanitizer from text settings and the whitelist repository.
#[derive(Debug, Clone)]
pub struct SanitizerFactory {
    enabled: bool,
    repository: WhitelistRepository,
}

impl SanitizerFactory {
    pub fn new(enabled: bool, repository: WhitelistRepository) -> Self {
        Self {
            enabled,
            repository,
        }
    }

    /// Create the sanitizer, or `None` when whitelisting is switched off.
    ///
    /// `None` means "don't sanitize", not an error.
    pub fn create(&self) -> Option<HtmlSanitizer> {
        if !self.enabled {
            tracing::info!("html whitelist disabled, content will not be sanitized");
            return None;
        }

        let policy = self.repository.load();
        build_sanitizer(&policy, true)
    }
}

/// Build a sanitizer for `policy`, or `None` when sanitizing is disabled.
pub fn build_sanitizer(policy: &WhitelistPolicy, enabled: bool) -> Option<HtmlSanitizer> {
    enabled.then(|| HtmlSanitizer::from_policy(policy))
}

/// Whether `url` names a scheme that runs script. Browsers ignore tabs,
/// newlines and other control characters inside a scheme.
fn runs_script(url: &str) -> bool {
    let url: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    url.split_once(':').is_some_and(|(scheme, _)| {
        SCRIPT_SCHEMES
            .iter()
            .any(|script| scheme.eq_ignore_ascii_case(script))
    })
}

/// ammonia borrows every name for the builder's lifetime. Sanitizers are
/// built once per process, so the names live as long as it does.
fn intern(names: impl Iterator<Item = String>) -> Vec<&'static str> {
    names
        .map(|name| -> &'static str { Box::leak(name.into_boxed_str()) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> HtmlSanitizer {
        HtmlSanitizer::from_policy(&WhitelistPolicy::empty())
    }

    #[test]
    fn test_disabled_returns_none() {
        assert!(build_sanitizer(&WhitelistPolicy::default_policy(), false).is_none());

        let factory = SanitizerFactory::new(false, WhitelistRepository::default());
        assert!(factory.create().is_none());
    }

    #[test]
    fn test_enabled_returns_sanitizer() {
        let factory = SanitizerFactory::new(true, WhitelistRepository::default());
        assert!(factory.create().is_some());
    }

    #[test]
    fn test_strips_script_and_event_handlers() {
        let clean = baseline().sanitize(
            r#"<p onclick="alert(1)">Hello</p><script>alert('XSS')</script>"#,
        );

        assert_eq!(clean, "<p>Hello</p>");
    }

    #[test]
    fn test_policy_widens_baseline() {
        let policy = WhitelistPolicy::new(["StarWarsMarquee"], ["cheesecake"]);
        let sanitizer = HtmlSanitizer::from_policy(&policy);

        let clean = sanitizer.sanitize(r#"<starwarsmarquee cheesecake="yes">far away</starwarsmarquee>"#);
        assert_eq!(
            clean,
            r#"<starwarsmarquee cheesecake="yes">far away</starwarsmarquee>"#
        );

        let stripped = baseline().sanitize(r#"<starwarsmarquee cheesecake="yes">far away</starwarsmarquee>"#);
        assert_eq!(stripped, "far away");
    }

    #[test]
    fn test_output_stays_within_allowed_union() {
        let policy = WhitelistPolicy::new(["kbd"], ["title"]);
        let sanitizer = HtmlSanitizer::from_policy(&policy);

        let clean = sanitizer.sanitize(
            r#"<div class="box" id="top" onmouseover="x()" style="color:red"><kbd title="key">Ctrl</kbd><marquee>old</marquee><iframe src="https://example.com"></iframe></div>"#,
        );

        assert_eq!(
            clean,
            r#"<div class="box" id="top"><kbd title="key">Ctrl</kbd>old</div>"#
        );
    }

    #[test]
    fn test_empty_policy_widens_nothing() {
        let clean = baseline().sanitize("<marquee>x</marquee><p>y</p>");
        assert_eq!(clean, "x<p>y</p>");
    }

    #[test]
    fn test_class_and_id_always_allowed() {
        let clean = baseline().sanitize(r#"<span class="note" id="n1">x</span>"#);
        assert_eq!(clean, r#"<span class="note" id="n1">x</span>"#);
    }

    #[test]
    fn test_data_attributes_never_pass() {
        let policy = WhitelistPolicy::new(Vec::<String>::new(), ["data-secret"]);
        let clean = HtmlSanitizer::from_policy(&policy).sanitize(r#"<p data-secret="1" data-x="2">x</p>"#);

        assert_eq!(clean, "<p>x</p>");
    }

    #[test]
    fn test_script_cannot_be_whitelisted() {
        let policy = WhitelistPolicy::new(["script", "style"], Vec::<String>::new());
        let clean = HtmlSanitizer::from_policy(&policy).sanitize("<p>a</p><script>b()</script><style>p{}</style>");

        assert_eq!(clean, "<p>a</p>");
    }

    #[test]
    fn test_schemes() {
        let sanitizer = baseline();

        let mail = sanitizer.sanitize(r#"<a href="mailto:someone@example.com">mail</a>"#);
        assert_eq!(mail, r#"<a href="mailto:someone@example.com">mail</a>"#);

        let web = sanitizer.sanitize(r#"<a href="https://example.com">web</a>"#);
        assert_eq!(web, r#"<a href="https://example.com">web</a>"#);

        let js = sanitizer.sanitize(r#"<a href="javascript:alert(1)">js</a>"#);
        assert_eq!(js, "<a>js</a>");
    }

    #[test]
    fn test_special_namespace_href_is_kept() {
        let html = r#"<a href="Special:redpage"></a>"#;
        assert_eq!(baseline().sanitize(html), html);

        let relative = r#"<a href="/wiki/Special:Tag/rust">rust</a>"#;
        assert_eq!(baseline().sanitize(relative), relative);
    }

    #[test]
    fn test_special_namespace_is_case_sensitive() {
        let clean = baseline().sanitize(r#"<a href="special:redpage">x</a>"#);
        assert_eq!(clean, "<a>x</a>");
    }

    #[test]
    fn test_special_href_kept_while_rest_of_tag_is_rewritten() {
        let clean = baseline().sanitize(r#"<a href="Special:Random" onclick="steal()">go</a>"#);
        assert_eq!(clean, r#"<a href="Special:Random">go</a>"#);
    }

    #[test]
    fn test_special_href_kept_whatever_the_scheme() {
        let sanitizer = HtmlSanitizer::from_policy(&WhitelistPolicy::default_policy());

        let html = r#"<a href="wiki:Special:Foo">x</a>"#;
        assert_eq!(sanitizer.sanitize(html), html);
    }

    #[test]
    fn test_special_href_kept_on_any_element() {
        let html = r#"<div href="Special:X">x</div>"#;
        assert_eq!(baseline().sanitize(html), html);
    }

    #[test]
    fn test_script_schemes_never_kept() {
        let sanitizer = baseline();
        let inputs = [
            r#"<a href="javascript:alert('Special:')">x</a>"#,
            r#"<a href=" JavaScript:alert(1)//Special:">x</a>"#,
            "<a href=\"java\tscript:alert(1)//Special:\">x</a>",
            r#"<a href="&#106;avascript:alert(1)//Special:">x</a>"#,
            r#"<a href="vbscript:msgbox//Special:">x</a>"#,
            r#"<a href="data:text/html,Special:<script>x()</script>">x</a>"#,
        ];

        for input in inputs {
            assert_eq!(sanitizer.sanitize(input), "<a>x</a>", "input: {input}");
        }
    }

    #[test]
    fn test_marker_attribute_written_by_author_is_checked() {
        let html = format!(r#"<a {KEPT_HREF}="javascript:alert(1)//Special:">x</a>"#);
        assert_eq!(baseline().sanitize(&html), "<a>x</a>");

        let html = format!(r#"<a {KEPT_HREF}="/wiki/Page">x</a>"#);
        assert_eq!(baseline().sanitize(&html), "<a>x</a>");
    }

    #[test]
    fn test_custom_keep_rule() {
        fn keep_nothing(_: &str, _: &str, _: &str) -> bool {
            false
        }
        let sanitizer = HtmlSanitizer::with_keep_rule(&WhitelistPolicy::empty(), keep_nothing);

        assert_eq!(sanitizer.sanitize(r#"<a href="Special:redpage">x</a>"#), "<a>x</a>");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let sanitizer = HtmlSanitizer::from_policy(&WhitelistPolicy::default_policy());
        let inputs = [
            r#"<p>Hello <b>world</b></p><script>x()</script>"#,
            r#"<table><tr><td colspan="2">cell</td></tr></table>"#,
            r#"<a href="Special:Tag" onclick="x">t</a><img src="x.png" onerror="y">"#,
            "<div><p>unclosed <em>tags",
            "plain & text < with > entities",
            "<pre>\n\nx</pre>",
            "<pre>\n\n\nx</pre>",
            r#"<a href="wiki:Special:Foo" title="a > b">x</a>"#,
        ];

        for input in inputs {
            let once = sanitizer.sanitize(input);
            assert_eq!(sanitizer.sanitize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_leading_newline_in_pre_survives() {
        let once = baseline().sanitize("<pre>\n\nx</pre>");

        assert_eq!(once, "<pre>\n\nx</pre>");
        assert_eq!(baseline().sanitize(&once), once);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(baseline().sanitize(""), "");
    }
}
