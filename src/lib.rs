//! mdblog: a minimal blog server backed by a directory of markdown files
//!
//! Posts are read from the content directory on every request, converted
//! to HTML and served through Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLoader, ContentSource, FsContentSource, LoadError, MarkdownRenderer, Post};

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory holding the posts
    pub content_dir: PathBuf,
    /// Static asset directory
    pub static_dir: PathBuf,
    /// Custom template directory, if any
    pub templates_dir: Option<PathBuf>,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::BlogConfig::load_from_dir(&base_dir)?;
        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::BlogConfig) -> Self {
        let content_dir = resolve_dir(&base_dir, &config.content_dir);
        let static_dir = resolve_dir(&base_dir, &config.static_dir);
        let templates_dir = config
            .templates_dir
            .as_ref()
            .map(|dir| resolve_dir(&base_dir, dir));

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            templates_dir,
        }
    }

    /// Markdown renderer configured for this blog
    pub fn renderer(&self) -> MarkdownRenderer {
        if self.config.highlight.enable {
            MarkdownRenderer::with_highlighting()
        } else {
            MarkdownRenderer::new()
        }
    }

    /// Filesystem content source for this blog
    pub fn content_source(&self) -> FsContentSource {
        FsContentSource::new(ContentLoader::new(self.renderer()))
    }

    /// Load all posts from the content directory
    pub fn load_posts(&self) -> Result<Vec<Post>, LoadError> {
        self.content_source().load(&self.content_dir)
    }
}

/// Resolve a configured directory against the base directory
fn resolve_dir(base_dir: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        base_dir.join(dir)
    }
}
