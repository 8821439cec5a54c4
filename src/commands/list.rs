//! List site content

use anyhow::Result;

use crate::content::{collection, count_tags};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let mut posts = blog.load_posts()?;
            collection::newest_first(&mut posts);
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.publish_date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let posts = blog.load_posts()?;
            let tags = count_tags(&posts);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
