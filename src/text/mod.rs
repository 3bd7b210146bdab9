//! Rendering of page markup to display-ready HTML.

pub mod markdown;
pub mod pipeline;
pub mod sanitizer;
pub mod tokens;

pub use pipeline::{Content, Pipeline, PipelineError, Stage};
