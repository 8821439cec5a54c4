//! Queries the pages run over a freshly loaded post collection

use super::Post;

/// Sort posts by publish date, newest first.
///
/// The sort is stable, so posts with equal dates keep their load order.
pub fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
}

/// Find a post by slug; with duplicate slugs the first one wins
pub fn find_by_slug<'a>(posts: &'a [Post], slug: &str) -> Option<&'a Post> {
    posts.iter().find(|post| post.slug == slug)
}

/// Posts carrying `tag`, compared case-insensitively
pub fn tagged(posts: &[Post], tag: &str) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| post.has_tag(tag))
        .cloned()
        .collect()
}
