//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file in the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,

    // Directory
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Directory with `base.html`, `home.html` and `post.html`; the
    /// embedded templates are used when unset
    pub templates_dir: Option<PathBuf>,

    // Server
    pub ip: String,
    pub port: u16,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "My Markdown Blog".to_string(),

            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            templates_dir: None,

            ip: "localhost".to_string(),
            port: 8080,

            highlight: HighlightConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `_config.yml` from `base_dir`, falling back to defaults
    pub fn load_from_dir<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);
        if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.title, "My Markdown Blog");
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.port, 8080);
        assert!(config.templates_dir.is_none());
        assert!(!config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes
content_dir: posts
port: 3000
highlight:
  enable: true
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.content_dir, PathBuf::from("posts"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.port, 3000);
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_load_from_dir_without_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = BlogConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.title, "My Markdown Blog");
    }

    #[test]
    fn test_load_from_dir_with_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: From Disk\nip: 0.0.0.0\n").unwrap();
        let config = BlogConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.title, "From Disk");
        assert_eq!(config.ip, "0.0.0.0");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "port: not-a-number\n").unwrap();
        assert!(BlogConfig::load_from_dir(dir.path()).is_err());
    }
}
