//! Markdown rendering with heading anchors and external link targets

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Markdown renderer producing the HTML body of a post
pub struct MarkdownRenderer {
    /// Present only when syntax highlighting is enabled
    syntax_set: Option<SyntaxSet>,
}

impl MarkdownRenderer {
    /// Create a renderer that leaves code blocks unhighlighted
    pub fn new() -> Self {
        Self { syntax_set: None }
    }

    /// Create a renderer that highlights fenced code blocks with CSS classes
    pub fn with_highlighting() -> Self {
        Self {
            syntax_set: Some(SyntaxSet::load_defaults_newlines()),
        }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options());

        let mut events: Vec<Event> = Vec::new();
        let mut seen_ids: HashMap<String, usize> = HashMap::new();
        // Index of the open heading's start event and its plain text so far
        let mut heading: Option<(usize, String)> = None;
        // One entry per open link, true when we emitted the tag ourselves
        let mut links: Vec<bool> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            if let Some((_, text)) = heading.as_mut() {
                if let Event::Text(t) | Event::Code(t) = &event {
                    text.push_str(t);
                }
            }

            if code_block.is_some() {
                match event {
                    Event::Text(text) => {
                        if let Some((_, code)) = code_block.as_mut() {
                            code.push_str(&text);
                        }
                    }
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((lang, code)) = code_block.take() {
                            let highlighted = self.highlight_code(&code, lang.as_deref());
                            events.push(Event::Html(CowStr::from(highlighted)));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.syntax_set.is_some() => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Heading { .. }) => {
                    heading = Some((events.len(), String::new()));
                    events.push(event);
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some((start, text)) = heading.take() {
                        if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                            if id.is_none() {
                                *id = unique_heading_id(&text, &mut seen_ids).map(CowStr::from);
                            }
                        }
                    }
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) if link_type != LinkType::Email && !is_relative_link(&dest_url) => {
                    let mut tag = format!(r#"<a href="{}""#, html_escape(&dest_url));
                    if !title.is_empty() {
                        tag.push_str(&format!(r#" title="{}""#, html_escape(&title)));
                    }
                    tag.push_str(r#" target="_blank">"#);
                    events.push(Event::InlineHtml(CowStr::from(tag)));
                    links.push(true);
                }
                Event::Start(Tag::Link { .. }) => {
                    events.push(event);
                    links.push(false);
                }
                Event::End(TagEnd::Link) => {
                    if links.pop().unwrap_or(false) {
                        events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                    } else {
                        events.push(event);
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        html_output
    }

    /// Highlight a fenced code block, keeping the `language-xxx` class
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let class = lang
            .map(|lang| format!(r#" class="language-{}""#, html_escape(lang)))
            .unwrap_or_default();

        let Some(syntax_set) = self.syntax_set.as_ref() else {
            return format!("<pre><code{}>{}</code></pre>\n", class, html_escape(code));
        };

        let syntax = lang
            .and_then(|lang| {
                syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| syntax_set.find_syntax_by_extension(lang))
            })
            .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::warn!(
                    "Failed to highlight {} code block: {}",
                    lang.unwrap_or("plain"),
                    e
                );
                return format!("<pre><code{}>{}</code></pre>\n", class, html_escape(code));
            }
        }

        format!("<pre><code{}>{}</code></pre>\n", class, generator.finalize())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a heading anchor, suffixing `-1`, `-2`... on repeats
fn unique_heading_id(text: &str, seen: &mut HashMap<String, usize>) -> Option<String> {
    let base = slug::slugify(text);
    if base.is_empty() {
        return None;
    }

    let count = seen.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
        base
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;

    Some(id)
}

/// Links inside the site stay in the current tab
fn is_relative_link(url: &str) -> bool {
    url.is_empty()
        || url.starts_with('#')
        || (url.starts_with('/') && !url.starts_with("//"))
        || url.starts_with("./")
        || url.starts_with("../")
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
