//! Configuration loading from files.
//!
//! This module handles reading and parsing configuration files.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// Config file looked up when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "wiki.yaml";

impl Config {
    /// Load the config from the command line argument.
    ///
    /// Without an argument `wiki.yaml` is used if it exists, otherwise the
    /// built-in defaults. An explicitly named file must exist.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let (config_file, explicit) = match config_file {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        if !explicit && !config_file.exists() {
            tracing::debug!(
                path = %config_file.display(),
                "no config file found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse config from YAML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid "all defaults" config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut Option<PathBuf>| {
            if let Some(p) = path
                && p.is_relative()
                && !p.as_os_str().is_empty()
            {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.text.html_element_whitelist_path);
        resolve(&mut self.server.categories_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert!(config.text.use_html_whitelist);
        assert!(config.text.html_element_whitelist_path.is_none());
        assert!(config.markdown.extensions.contains(&"tables".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_sections() {
        let config = Config::parse(
            "text:\n  use_html_whitelist: false\n  html_element_whitelist_path: whitelist.json\nmarkdown:\n  extensions: [tables]\nserver:\n  port: 8080\n",
        )
        .unwrap();

        assert!(!config.text.use_html_whitelist);
        assert_eq!(
            config.text.html_element_whitelist_path,
            Some(PathBuf::from("whitelist.json"))
        );
        assert_eq!(config.markdown.extensions, vec!["tables".to_string()]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "0.0.0.0");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(
            Config::parse("text: [not, a, map]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.yaml");
        std::fs::write(
            &path,
            "text:\n  html_element_whitelist_path: whitelist.json\nserver:\n  categories_path: /abs/categories.json\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(
            config.text.html_element_whitelist_path,
            Some(dir.path().join("whitelist.json"))
        );
        assert_eq!(
            config.server.categories_path,
            Some(PathBuf::from("/abs/categories.json"))
        );
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = Config::load_from_arg(Some(Path::new("/definitely/not/here/wiki.yaml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
