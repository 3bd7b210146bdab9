//! Sanitization stage.

use crate::text::pipeline::{Content, PipelineError, Stage};
use crate::text::sanitizer::{HtmlSanitizer, SanitizerFactory};

/// Stage that strips elements, attributes and URL schemes the whitelist
/// doesn't allow.
///
/// Without a sanitizer (whitelisting switched off) the stage passes content
/// through untouched.
pub struct HarmfulTagStage {
    sanitizer: Option<HtmlSanitizer>,
}

impl HarmfulTagStage {
    pub const NAME: &'static str = "harmful-tags";

    pub fn new(sanitizer: Option<HtmlSanitizer>) -> Self {
        Self { sanitizer }
    }

    pub fn from_factory(factory: &SanitizerFactory) -> Self {
        Self::new(factory.create())
    }
}

impl Stage for HarmfulTagStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process(&self, content: &mut Content) -> Result<(), PipelineError> {
        if let Some(sanitizer) = &self.sanitizer
            && !content.is_empty()
        {
            content.html = sanitizer.sanitize(&content.html);
        }
        Ok(())
    }
}
