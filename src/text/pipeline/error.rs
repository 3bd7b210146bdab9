//! Pipeline error types.

use crate::text::markdown::MarkdownError;

/// Errors that can occur while assembling or running the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("markdown configuration error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("stage '{0}' not found in pipeline")]
    UnknownStage(String),

    #[error("stage '{before}' must run before stage '{after}'")]
    Ordering {
        before: &'static str,
        after: &'static str,
    },

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
