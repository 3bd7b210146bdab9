//! Markdown to HTML conversion with heading anchors.

use std::collections::HashSet;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Translate the configured extension names into parser options.
pub fn markdown_options(markdown_config: &MarkdownConfig) -> Result<Options, MarkdownError> {
    let mut options = Options::empty();
    for extension in &markdown_config.extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }
    Ok(options)
}

/// A heading being collected until its end tag.
struct HeadingState<'a> {
    level: HeadingLevel,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    text: String,
    inner: Vec<Event<'a>>,
}

/// Render markdown to HTML.
///
/// Raw HTML in the source is passed through untouched; it is the
/// sanitizer's job to deal with it. Every heading gets a unique `id` and a
/// permalink anchor.
pub fn render_markdown(markdown: &str, options: Options) -> String {
    let parser = Parser::new_ext(markdown, options);

    let mut used_heading_ids: HashSet<String> = HashSet::new();
    let mut heading: Option<HeadingState> = None;
    let mut events: Vec<Event> = Vec::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                heading = Some(HeadingState {
                    level,
                    id: id.map(|id| id.to_string()),
                    classes: classes.iter().map(|c| c.to_string()).collect(),
                    attrs: attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                        .collect(),
                    text: String::new(),
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(state) = heading.take() {
                    let rendered = render_heading(state, &mut used_heading_ids);
                    events.push(Event::Html(CowStr::from(rendered)));
                }
            }
            event => match heading.as_mut() {
                Some(state) => {
                    if let Event::Text(text) | Event::Code(text) = &event {
                        state.text.push_str(text);
                    }
                    state.inner.push(event);
                }
                None => events.push(event),
            },
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn render_heading(state: HeadingState, used_heading_ids: &mut HashSet<String>) -> String {
    let id = match state.id {
        Some(id) => {
            used_heading_ids.insert(id.clone());
            id
        }
        None => {
            let base_id = match heading_id(&state.text) {
                id if id.is_empty() => "section".to_string(),
                id => id,
            };
            let mut id = base_id.clone();
            let mut suffix = 1;
            while used_heading_ids.contains(&id) {
                id = format!("{}-{}", base_id, suffix);
                suffix += 1;
            }
            used_heading_ids.insert(id.clone());
            id
        }
    };

    let class_attr = if state.classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_html(&state.classes.join(" ")))
    };

    let extra_attrs = state
        .attrs
        .iter()
        .map(|(k, v)| match v {
            Some(val) => format!(" {}=\"{}\"", escape_html(k), escape_html(val)),
            None => format!(" {}", escape_html(k)),
        })
        .collect::<String>();

    let mut inner = String::new();
    html::push_html(&mut inner, state.inner.into_iter());

    let level = state.level as usize;
    let id = escape_html(&id);
    format!(
        "<h{level} id=\"{id}\"{class_attr}{extra_attrs}>{inner} <a class=\"header-anchor\" href=\"#{id}\">#</a></h{level}>\n"
    )
}

/// Convert heading text to an id usable as a fragment.
fn heading_id(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(char::is_whitespace, "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
