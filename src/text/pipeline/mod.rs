//! Rendering pipeline for page content.
//!
//! The pipeline transforms page markup through a series of stages:
//! 1. Markdown conversion (to an HTML fragment)
//! 2. Harmful tag removal (whitelist sanitization)
//! 3. Custom token replacement (trusted HTML injection)
//!
//! Sanitization must come before token replacement. Tokens expand to trusted
//! markup (anchors, layout blocks) that the sanitizer could legitimately
//! strip, while running it first still cleans everything the author wrote.
//! The pipeline refuses any arrangement that breaks this order.
//!
//! Custom stages can be inserted before or after any named stage.

mod content;
mod error;
mod stages;

pub use content::Content;
pub use error::PipelineError;
pub use stages::{CustomTokenStage, HarmfulTagStage, MarkdownStage};

use crate::config::{MarkdownConfig, TextConfig};
use crate::text::sanitizer::{SanitizerFactory, WhitelistRepository};
use crate::text::tokens::CustomTokenParser;

/// A stage in the rendering pipeline.
///
/// Stages run in order over one [`Content`]. A stage that returns an error
/// must leave the content as it found it; the pipeline then logs the error
/// and carries on with the next stage.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used for insertion points and logging).
    fn name(&self) -> &'static str;

    /// Transform the content in place.
    fn process(&self, content: &mut Content) -> Result<(), PipelineError>;
}

/// The content rendering pipeline.
///
/// Built once at startup and shared by every render request; running it
/// only needs `&self`.
///
/// # Extension Points
///
/// Insert custom stages using `insert_before` or `insert_after`:
///
/// ```ignore
/// pipeline.insert_after("markdown", MyCustomStage)?;
/// ```
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the standard pipeline from configuration.
    ///
    /// Stages: markdown → harmful-tags → custom-tokens
    ///
    /// Fails only for an invalid markdown extension. Whitelist problems
    /// degrade to the default policy instead.
    pub fn from_config(
        text_config: &TextConfig,
        markdown_config: &MarkdownConfig,
    ) -> Result<Self, PipelineError> {
        let repository = WhitelistRepository::new(text_config.html_element_whitelist_path.clone());
        let factory = SanitizerFactory::new(text_config.use_html_whitelist, repository);

        let mut pipeline = Self::new();
        pipeline
            .add_stage(MarkdownStage::new(markdown_config)?)?
            .add_stage(HarmfulTagStage::from_factory(&factory))?
            .add_stage(CustomTokenStage::new(CustomTokenParser::new()))?;

        tracing::debug!(stages = ?pipeline.stage_names(), "built rendering pipeline");
        Ok(pipeline)
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> Result<&mut Self, PipelineError> {
        let pos = self.stages.len();
        self.insert_at(pos, stage)
    }

    /// Insert a stage before the named stage.
    pub fn insert_before<S: Stage + 'static>(
        &mut self,
        name: &str,
        stage: S,
    ) -> Result<&mut Self, PipelineError> {
        let pos = self.position(name)?;
        self.insert_at(pos, stage)
    }

    /// Insert a stage after the named stage.
    pub fn insert_after<S: Stage + 'static>(
        &mut self,
        name: &str,
        stage: S,
    ) -> Result<&mut Self, PipelineError> {
        let pos = self.position(name)?;
        self.insert_at(pos + 1, stage)
    }

    /// Run the pipeline over one piece of content.
    ///
    /// `None` passes straight through. A failing stage is skipped, so the
    /// worst case is a page rendered with less processing, never no page.
    pub fn execute(&self, content: Option<Content>) -> Option<Content> {
        let mut content = content?;

        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), "running stage");
            if let Err(e) = stage.process(&mut content) {
                tracing::warn!(
                    stage = stage.name(),
                    error = %e,
                    "stage failed, passing content through"
                );
            }
        }

        Some(content)
    }

    /// Render raw page markup to display-ready HTML.
    pub fn render(&self, raw_markup: &str) -> String {
        self.execute(Some(Content::new(raw_markup)))
            .map(Content::into_html)
            .unwrap_or_default()
    }

    /// Get the names of all stages in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    fn position(&self, name: &str) -> Result<usize, PipelineError> {
        self.stages
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| PipelineError::UnknownStage(name.to_string()))
    }

    fn insert_at<S: Stage + 'static>(
        &mut self,
        pos: usize,
        stage: S,
    ) -> Result<&mut Self, PipelineError> {
        self.stages.insert(pos, Box::new(stage));
        if let Err(e) = self.check_order() {
            self.stages.remove(pos);
            return Err(e);
        }
        Ok(self)
    }

    /// Sanitization must run before token replacement.
    fn check_order(&self) -> Result<(), PipelineError> {
        let names = self.stage_names();
        let sanitize = names.iter().position(|n| *n == HarmfulTagStage::NAME);
        let tokens = names.iter().position(|n| *n == CustomTokenStage::NAME);

        match (sanitize, tokens) {
            (Some(s), Some(t)) if s > t => Err(PipelineError::Ordering {
                before: HarmfulTagStage::NAME,
                after: CustomTokenStage::NAME,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
