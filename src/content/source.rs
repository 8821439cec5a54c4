//! Where the server gets its posts from

use std::path::Path;

use super::{ContentLoader, LoadError, Post};

/// A provider of post collections.
///
/// The server asks for a fresh collection on every request.
pub trait ContentSource: Send + Sync {
    fn load(&self, dir: &Path) -> Result<Vec<Post>, LoadError>;
}

/// Reads posts from the filesystem
pub struct FsContentSource {
    loader: ContentLoader,
}

impl FsContentSource {
    pub fn new(loader: ContentLoader) -> Self {
        Self { loader }
    }
}

impl ContentSource for FsContentSource {
    fn load(&self, dir: &Path) -> Result<Vec<Post>, LoadError> {
        self.loader.load(dir)
    }
}

/// Serves a fixed set of posts, or fails every load
pub struct StaticContentSource {
    posts: Option<Vec<Post>>,
}

impl StaticContentSource {
    /// Always return `posts`, whatever directory is asked for
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts: Some(posts) }
    }

    /// Fail every load as if the directory were missing
    pub fn failing() -> Self {
        Self { posts: None }
    }
}

impl ContentSource for StaticContentSource {
    fn load(&self, dir: &Path) -> Result<Vec<Post>, LoadError> {
        self.posts.clone().ok_or_else(|| LoadError::NotFound {
            path: dir.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_static_source_returns_posts() {
        let post = Post {
            title: "Fixed".to_string(),
            slug: "fixed".to_string(),
            raw_content: String::new(),
            rendered_content: String::new(),
            summary: String::new(),
            publish_date: Local::now(),
            tags: Vec::new(),
        };
        let source = StaticContentSource::new(vec![post.clone()]);
        assert_eq!(source.load(Path::new("anywhere")).unwrap(), vec![post]);
    }

    #[test]
    fn test_failing_source() {
        let source = StaticContentSource::failing();
        let err = source.load(Path::new("content")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_fs_source_reads_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("hello.md"), "# Hello\nWorld").unwrap();

        let source = FsContentSource::new(ContentLoader::default());
        let posts = source.load(dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello");
    }
}
