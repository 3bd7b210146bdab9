//! Markdown conversion stage.

use pulldown_cmark::Options;

use crate::config::MarkdownConfig;
use crate::text::markdown::{MarkdownError, markdown_options, render_markdown};
use crate::text::pipeline::{Content, PipelineError, Stage};

/// Stage that converts the raw markdown to an HTML fragment.
///
/// Extension names are validated when the stage is built, so rendering
/// itself cannot fail.
pub struct MarkdownStage {
    options: Options,
}

impl MarkdownStage {
    pub const NAME: &'static str = "markdown";

    pub fn new(markdown_config: &MarkdownConfig) -> Result<Self, MarkdownError> {
        Ok(Self {
            options: markdown_options(markdown_config)?,
        })
    }
}

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process(&self, content: &mut Content) -> Result<(), PipelineError> {
        if content.is_empty() {
            return Ok(());
        }
        content.html = render_markdown(&content.html, self.options);
        Ok(())
    }
}
