//! Errors raised while turning the content directory into posts

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single file could not be turned into a post
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("`{file}` is not valid UTF-8")]
    Encoding {
        file: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Loading the content directory failed as a whole
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot resolve content path `{}`", path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("content directory `{}` does not exist or is not a directory", path.display())]
    NotFound { path: PathBuf },

    #[error("IO error when reading `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
