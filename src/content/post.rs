//! Post model and the parser that builds it from a markdown file

use chrono::{DateTime, Local};
use std::borrow::Cow;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{MarkdownRenderer, ParseError};

/// Number of characters kept in a summary before the ellipsis
pub const SUMMARY_LEN: usize = 150;

lazy_static! {
    static ref TAGS_LINE: Regex = Regex::new(r"(?m)^Tags:[ \t]*(.*)$").unwrap();
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// First line of the file without its `# ` marker
    pub title: String,

    /// File name without the `.md` extension
    pub slug: String,

    /// Markdown body without the title and tags lines, trimmed
    pub raw_content: String,

    /// Rendered HTML body
    pub rendered_content: String,

    /// Leading part of the raw body
    pub summary: String,

    /// Modification time of the file when it was loaded
    pub publish_date: DateTime<Local>,

    /// Tags in file order, duplicates kept
    pub tags: Vec<String>,
}

impl Post {
    /// Parse a post from the bytes of `filename`
    pub fn parse(
        filename: &str,
        bytes: &[u8],
        modified: DateTime<Local>,
        renderer: &MarkdownRenderer,
    ) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|source| ParseError::Encoding {
            file: filename.to_string(),
            source,
        })?;

        let (tags, text) = extract_tags(text);
        let text: &str = &text;

        let (title_line, body) = text.split_once('\n').unwrap_or((text, ""));
        let title_line = title_line.trim_end_matches('\r');
        let title = title_line.strip_prefix("# ").unwrap_or(title_line);
        let body = body.trim();

        Ok(Self {
            title: title.to_string(),
            slug: filename.strip_suffix(".md").unwrap_or(filename).to_string(),
            raw_content: body.to_string(),
            rendered_content: renderer.render(body),
            summary: summarize(body),
            publish_date: modified,
            tags,
        })
    }

    /// Whether the post carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// Pull the tags out of the first `Tags:` line and drop every such line
fn extract_tags(text: &str) -> (Vec<String>, Cow<'_, str>) {
    let Some(captures) = TAGS_LINE.captures(text) else {
        return (Vec::new(), Cow::Borrowed(text));
    };

    let tags = captures
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect();

    (tags, TAGS_LINE.replace_all(text, ""))
}

/// First `SUMMARY_LEN` characters, with `...` when the body is longer
fn summarize(body: &str) -> String {
    match body.char_indices().nth(SUMMARY_LEN) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
