//! Configuration type definitions.
//!
//! This module contains all the data structures used in wikirender
//! configuration files. These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The whole configuration file.
///
/// Every section is optional; a missing section takes its defaults.
///
/// ```yaml
/// text:
///   use_html_whitelist: true
///   html_element_whitelist_path: ./whitelist.json
/// markdown:
///   extensions: [tables, strikethrough]
/// server:
///   bind: 127.0.0.1
///   port: 8080
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

// =============================================================================
// Text configuration
// =============================================================================

/// Settings for the rendering pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Sanitize rendered HTML against the whitelist (default: true).
    /// When false the harmful-tag stage passes content through untouched.
    #[serde(default = "default_use_html_whitelist")]
    pub use_html_whitelist: bool,
    /// JSON file listing extra allowed elements and attributes.
    /// Relative paths are resolved against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_element_whitelist_path: Option<PathBuf>,
}

fn default_use_html_whitelist() -> bool {
    true
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            use_html_whitelist: default_use_html_whitelist(),
            html_element_whitelist_path: None,
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "definition_lists".to_string(),
        "footnotes".to_string(),
        "gfm".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}

// =============================================================================
// Server configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// The port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
    /// JSON file with the categories the enrich endpoint resolves against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_path: Option<PathBuf>,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            categories_path: None,
        }
    }
}
