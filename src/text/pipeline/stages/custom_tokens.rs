//! Custom token stage.

use crate::text::pipeline::{Content, PipelineError, Stage};
use crate::text::tokens::CustomTokenParser;

/// Stage that replaces custom tokens with their HTML.
///
/// Must run after [`HarmfulTagStage`](super::HarmfulTagStage): the HTML it
/// injects is trusted and would otherwise be stripped.
pub struct CustomTokenStage {
    parser: CustomTokenParser,
}

impl CustomTokenStage {
    pub const NAME: &'static str = "custom-tokens";

    pub fn new(parser: CustomTokenParser) -> Self {
        Self { parser }
    }
}

impl Stage for CustomTokenStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process(&self, content: &mut Content) -> Result<(), PipelineError> {
        content.html = self.parser.replace_tokens_after_parse(&content.html);
        Ok(())
    }
}
