//! Content loader - loads posts from the content directory

use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use super::{LoadError, MarkdownRenderer, Post};

/// Loads every post of a content directory
pub struct ContentLoader {
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(renderer: MarkdownRenderer) -> Self {
        Self { renderer }
    }

    /// Load all posts directly inside `dir`.
    ///
    /// Any unreadable or unparsable file fails the whole load.
    pub fn load(&self, dir: &Path) -> Result<Vec<Post>, LoadError> {
        let root = std::path::absolute(dir).map_err(|source| LoadError::InvalidPath {
            path: dir.to_path_buf(),
            source,
        })?;

        match fs::metadata(&root) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(LoadError::NotFound { path: root }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound { path: root })
            }
            Err(source) => return Err(LoadError::Io { path: root, source }),
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| LoadError::Io {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                source: e.into(),
            })?;

            if entry.file_type().is_dir() || !is_markdown_file(entry.path()) {
                tracing::debug!("Skipping {:?}: not a markdown file", entry.path());
                continue;
            }

            let path = root.join(entry.file_name());
            if !path.starts_with(&root) {
                tracing::debug!("Skipping {:?}: outside of {:?}", path, root);
                continue;
            }

            posts.push(self.load_post(&path)?);
        }

        tracing::info!("Loaded {} posts from {:?}", posts.len(), root);

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post, LoadError> {
        let io_error = |source: io::Error| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let modified = fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map(DateTime::<Local>::from)
            .map_err(io_error)?;
        let bytes = fs::read(path).map_err(io_error)?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let post = Post::parse(&filename, &bytes, modified, &self.renderer)?;
        tracing::debug!("Loaded post {:?} from {:?}", post.slug, path);

        Ok(post)
    }
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new(MarkdownRenderer::new())
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
