//! String-level touch-ups around the ammonia clean.
//!
//! Both passes only look at start tags, matched with an attribute-aware
//! pattern so quoted values containing `>` or `<` don't split a tag.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A start tag: name, attribute run, optional self-closing slash.
static RE_START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<([A-Za-z][^\s/>]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?)*)\s*/?>"#,
    )
    .expect("valid regex")
});

/// One attribute inside a start tag's attribute run.
static RE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+([^\s"'>/=]+)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'=<>`]+))?"#)
        .expect("valid regex")
});

/// Elements whose first newline the HTML parser swallows.
const NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// Rename attributes in every start tag.
///
/// `rename` gets the lower-cased element name, the attribute name as
/// written and the unquoted raw value, and returns the new name for
/// attributes that should change. Values are left byte for byte.
pub(super) fn rename_attributes<F>(html: &str, rename: F) -> String
where
    F: Fn(&str, &str, &str) -> Option<&'static str>,
{
    RE_START_TAG
        .replace_all(html, |caps: &Captures<'_>| {
            let tag = &caps[0];
            let tag_start = caps.get(0).map_or(0, |m| m.start());
            let Some(attributes) = caps.get(2) else {
                return tag.to_string();
            };
            let offset = attributes.start() - tag_start;
            let element = caps[1].to_ascii_lowercase();

            let mut out = String::with_capacity(tag.len());
            let mut copied = 0;
            for attribute in RE_ATTRIBUTE.captures_iter(attributes.as_str()) {
                let Some(name) = attribute.get(1) else {
                    continue;
                };
                let value = attribute.get(2).map_or("", |v| unquote(v.as_str()));
                if let Some(new_name) = rename(&element, name.as_str(), value) {
                    out.push_str(&tag[copied..offset + name.start()]);
                    out.push_str(new_name);
                    copied = offset + name.end();
                }
            }
            out.push_str(&tag[copied..]);
            out
        })
        .into_owned()
}

/// Put back the newline the parser drops after `<pre>`, `<textarea>` and
/// `<listing>` when their content starts with one.
///
/// Without this every parse of the serialized output loses another line.
pub(super) fn restore_leading_newlines(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut copied = 0;

    for caps in RE_START_TAG.captures_iter(html) {
        let (Some(tag), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let is_newline_element = NEWLINE_ELEMENTS
            .iter()
            .any(|element| name.as_str().eq_ignore_ascii_case(element));
        if is_newline_element && html[tag.end()..].starts_with('\n') {
            out.push_str(&html[copied..tag.end()]);
            out.push('\n');
            copied = tag.end();
        }
    }

    out.push_str(&html[copied..]);
    out
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}
