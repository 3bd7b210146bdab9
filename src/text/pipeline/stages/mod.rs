//! Default pipeline stages.
//!
//! The standard rendering pipeline consists of:
//!
//! 1. **MarkdownStage** - Convert markdown to HTML
//! 2. **HarmfulTagStage** - Strip markup the whitelist doesn't allow
//! 3. **CustomTokenStage** - Replace custom tokens with trusted HTML

mod custom_tokens;
mod harmful_tags;
mod markdown;

pub use custom_tokens::CustomTokenStage;
pub use harmful_tags::HarmfulTagStage;
pub use markdown::MarkdownStage;
