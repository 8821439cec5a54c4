//! Page templates using the Tera template engine
//!
//! The default templates are embedded in the binary. A site can replace
//! them with its own `base.html`, `home.html` and `post.html`.

use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

use crate::content::Post;

/// Templates every template set must provide
const REQUIRED_TEMPLATES: [&str; 3] = ["base.html", "home.html", "post.html"];

/// Template renderer for the blog pages
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with the embedded templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("blog/base.html")),
            ("home.html", include_str!("blog/home.html")),
            ("post.html", include_str!("blog/post.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Load templates from a directory instead of the embedded ones
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let pattern = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&pattern)?;

        let names: Vec<&str> = tera.get_template_names().collect();
        for required in REQUIRED_TEMPLATES {
            if !names.contains(&required) {
                bail!("Template directory {:?} has no {}", dir, required);
            }
        }

        tracing::debug!("Loaded templates from {:?}", dir);
        Ok(Self { tera })
    }

    /// Render a template with the given page data
    pub fn render(&self, template_name: &str, data: &PageData) -> tera::Result<String> {
        let context = Context::from_serialize(data)?;
        self.tera.render(template_name, &context)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub site_title: String,
    pub current_year: i32,
    pub posts: Vec<PostData>,
    pub all_tags: Vec<TagLink>,
    pub active_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub datetime: String,
    pub summary: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            date: post.publish_date.format("%B %d, %Y").to_string(),
            datetime: post.publish_date.to_rfc3339(),
            summary: post.summary.clone(),
            content: post.rendered_content.clone(),
            tags: post.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub active: bool,
}

impl TagLink {
    /// Build the tag navigation, marking `active` case-insensitively
    pub fn list(tags: Vec<String>, active: Option<&str>) -> Vec<Self> {
        let active = active.map(str::to_lowercase);
        tags.into_iter()
            .map(|name| {
                let is_active = active.as_deref() == Some(name.to_lowercase().as_str());
                Self {
                    name,
                    active: is_active,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample_post() -> Post {
        Post {
            title: "Fish & Chips".to_string(),
            slug: "fish-and-chips".to_string(),
            raw_content: "Tasty".to_string(),
            rendered_content: "<p>Tasty <em>food</em></p>\n".to_string(),
            summary: "Tasty".to_string(),
            publish_date: Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
            tags: vec!["food".to_string(), "uk news".to_string()],
        }
    }

    fn page(posts: Vec<PostData>, active_tag: Option<&str>) -> PageData {
        PageData {
            title: "Blog".to_string(),
            site_title: "Blog".to_string(),
            current_year: 2024,
            posts,
            all_tags: TagLink::list(
                vec!["Food".to_string(), "uk news".to_string()],
                active_tag,
            ),
            active_tag: active_tag.map(String::from),
        }
    }

    #[test]
    fn test_render_home() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render("home.html", &page(vec![PostData::from(&sample_post())], None))
            .unwrap();
        assert!(html.contains("<title>Blog</title>"));
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains("href=\"/post/fish-and-chips\""));
        assert!(html.contains("href=\"/tag/uk%20news\""));
        assert!(html.contains("March 09, 2024"));
        assert!(html.contains("&copy; 2024 Blog"));
    }

    #[test]
    fn test_tag_links_escape_slashes() {
        let mut post = sample_post();
        post.tags = vec!["c/c++".to_string()];

        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render("post.html", &page(vec![PostData::from(&post)], None))
            .unwrap();
        assert!(html.contains("href=\"/tag/c%2Fc%2B%2B\""));
        assert!(!html.contains("href=\"/tag/c/"));
    }

    #[test]
    fn test_render_post_keeps_html_content() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render("post.html", &page(vec![PostData::from(&sample_post())], None))
            .unwrap();
        assert!(html.contains("<p>Tasty <em>food</em></p>"));
    }

    #[test]
    fn test_render_empty_listing() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render("home.html", &page(Vec::new(), None)).unwrap();
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_active_tag_is_marked() {
        let tags = TagLink::list(vec!["Food".to_string(), "uk news".to_string()], Some("food"));
        assert!(tags[0].active);
        assert!(!tags[1].active);

        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render("home.html", &page(Vec::new(), Some("food"))).unwrap();
        assert!(html.contains("Posts tagged 'food'"));
        assert!(html.contains("class=\"active\">Food</a>"));
    }

    #[test]
    fn test_from_dir_requires_all_templates() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("base.html"),
            "{% block content %}{% endblock content %}",
        )
        .unwrap();
        assert!(TemplateRenderer::from_dir(dir.path()).is_err());

        std::fs::write(
            dir.path().join("home.html"),
            "{% extends \"base.html\" %}{% block content %}{{ title }}{% endblock content %}",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("post.html"),
            "{% extends \"base.html\" %}{% block content %}post{% endblock content %}",
        )
        .unwrap();

        let renderer = TemplateRenderer::from_dir(dir.path()).unwrap();
        let html = renderer.render("home.html", &page(Vec::new(), None)).unwrap();
        assert_eq!(html, "Blog");
    }
}
