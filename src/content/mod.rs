//! Content module - turns the content directory into posts

pub mod collection;
mod error;
pub mod loader;
mod markdown;
mod post;
mod source;
mod tags;

pub use error::{LoadError, ParseError};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, SUMMARY_LEN};
pub use source::{ContentSource, FsContentSource, StaticContentSource};
pub use tags::{aggregate_tags, count_tags};
