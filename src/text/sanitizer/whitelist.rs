//! Allow-list policy loading.
//!
//! The whitelist is an optional JSON document listing the extra HTML elements
//! and attributes the sanitizer should permit:
//!
//! ```json
//! {
//!   "allowedElements": ["marquee", "kbd"],
//!   "allowedAttributes": ["title", "colspan"]
//! }
//! ```
//!
//! Anything wrong with the document (missing file, bad JSON, wrong shape)
//! falls back to [`WhitelistPolicy::default_policy`]. A broken whitelist must
//! never stop pages from rendering.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors reading a whitelist document.
///
/// These never leave [`WhitelistRepository::load`]; they exist so the
/// fallback can log what went wrong.
#[derive(thiserror::Error, Debug)]
pub enum WhitelistError {
    #[error("failed to read whitelist file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse whitelist file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The extra element and attribute names the sanitizer permits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistPolicy {
    #[serde(rename = "allowedElements", alias = "AllowedElements")]
    pub allowed_elements: BTreeSet<String>,

    #[serde(rename = "allowedAttributes", alias = "AllowedAttributes")]
    pub allowed_attributes: BTreeSet<String>,
}

const DEFAULT_ELEMENTS: &[&str] = &[
    "a", "b", "blockquote", "br", "caption", "code", "del", "div", "em", "h1", "h2", "h3", "h4",
    "h5", "h6", "hr", "i", "img", "ins", "kbd", "li", "ol", "p", "pre", "s", "span", "strike",
    "strong", "sub", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "u", "ul",
];

const DEFAULT_ATTRIBUTES: &[&str] = &[
    "align", "alt", "border", "colspan", "height", "href", "rowspan", "src", "target", "title",
    "width",
];

impl WhitelistPolicy {
    /// Build a policy from element and attribute names.
    pub fn new<E, A>(elements: E, attributes: A) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            allowed_elements: elements.into_iter().map(Into::into).collect(),
            allowed_attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in policy used when no whitelist file is configured or the
    /// configured one is unusable.
    pub fn default_policy() -> Self {
        Self::new(
            DEFAULT_ELEMENTS.iter().copied(),
            DEFAULT_ATTRIBUTES.iter().copied(),
        )
    }

    /// A policy that widens nothing beyond the sanitizer baseline.
    pub fn empty() -> Self {
        Self {
            allowed_elements: BTreeSet::new(),
            allowed_attributes: BTreeSet::new(),
        }
    }
}

/// Loads the [`WhitelistPolicy`] from an optional JSON file.
#[derive(Debug, Clone, Default)]
pub struct WhitelistRepository {
    path: Option<PathBuf>,
}

impl WhitelistRepository {
    /// Create a repository reading from `path`. `None` or an empty path means
    /// "use the default policy".
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// The configured whitelist location, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Load the policy, falling back to the default on any failure.
    pub fn load(&self) -> WhitelistPolicy {
        let Some(path) = self.path() else {
            tracing::debug!("no html whitelist configured, using default policy");
            return WhitelistPolicy::default_policy();
        };

        match Self::read(path) {
            Ok(policy) => {
                tracing::debug!(
                    path = %path.display(),
                    elements = policy.allowed_elements.len(),
                    attributes = policy.allowed_attributes.len(),
                    "loaded html whitelist"
                );
                policy
            }
            Err(e) => {
                tracing::warn!("{e}; falling back to the default html whitelist");
                WhitelistPolicy::default_policy()
            }
        }
    }

    fn read(path: &Path) -> Result<WhitelistPolicy, WhitelistError> {
        let content = std::fs::read_to_string(path).map_err(|source| WhitelistError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| WhitelistError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = write_temp(
            r#"{"allowedElements": ["blah", "test"], "allowedAttributes": ["id", "class", "href"]}"#,
        );
        let repo = WhitelistRepository::new(Some(file.path().to_path_buf()));

        let policy = repo.load();

        assert_eq!(policy.allowed_elements.len(), 2);
        assert_eq!(policy.allowed_attributes.len(), 3);
        assert!(policy.allowed_elements.contains("blah"));
        assert!(policy.allowed_elements.contains("test"));
        assert!(policy.allowed_attributes.contains("href"));
    }

    #[test]
    fn test_load_accepts_pascal_case_fields() {
        let file = write_temp(r#"{"AllowedElements": ["kbd"], "AllowedAttributes": []}"#);
        let repo = WhitelistRepository::new(Some(file.path().to_path_buf()));

        let policy = repo.load();

        assert_eq!(policy, WhitelistPolicy::new(["kbd"], Vec::<String>::new()));
    }

    #[test]
    fn test_empty_lists_are_kept() {
        let file = write_temp(r#"{"allowedElements": [], "allowedAttributes": []}"#);
        let repo = WhitelistRepository::new(Some(file.path().to_path_buf()));

        assert_eq!(repo.load(), WhitelistPolicy::empty());
    }

    #[test]
    fn test_no_path_uses_default() {
        assert_eq!(
            WhitelistRepository::new(None).load(),
            WhitelistPolicy::default_policy()
        );
        assert_eq!(
            WhitelistRepository::new(Some(PathBuf::new())).load(),
            WhitelistPolicy::default_policy()
        );
    }

    #[test]
    fn test_missing_file_matches_no_path() {
        let missing = WhitelistRepository::new(Some("file that doesnt exist.json".into()));
        let unset = WhitelistRepository::new(None);

        assert_eq!(missing.load(), unset.load());
    }

    #[test]
    fn test_malformed_file_uses_default() {
        let file = write_temp("{ this is not json");
        let repo = WhitelistRepository::new(Some(file.path().to_path_buf()));

        assert_eq!(repo.load(), WhitelistPolicy::default_policy());
    }

    #[test]
    fn test_wrong_shape_uses_default() {
        let file = write_temp(r#"{"allowedElements": "p"}"#);
        let repo = WhitelistRepository::new(Some(file.path().to_path_buf()));

        assert_eq!(repo.load(), WhitelistPolicy::default_policy());
    }
}
