//! Tag index across a post collection

use std::collections::HashMap;

use super::Post;

/// Collect the distinct tags of `posts`.
///
/// Tags are merged case-insensitively, keeping the spelling seen first,
/// and returned in byte order of that spelling.
pub fn aggregate_tags(posts: &[Post]) -> Vec<String> {
    let mut tags: HashMap<String, &str> = HashMap::new();

    for post in posts {
        for tag in &post.tags {
            tags.entry(tag.to_lowercase()).or_insert(tag.as_str());
        }
    }

    let mut tags: Vec<String> = tags.into_values().map(String::from).collect();
    tags.sort();
    tags
}

/// Count how many posts carry each aggregated tag
pub fn count_tags(posts: &[Post]) -> Vec<(String, usize)> {
    aggregate_tags(posts)
        .into_iter()
        .map(|tag| {
            let count = posts.iter().filter(|post| post.has_tag(&tag)).count();
            (tag, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn post_with_tags(title: &str, tags: &[&str]) -> Post {
        Post {
            title: title.to_string(),
            slug: title.to_lowercase(),
            raw_content: String::new(),
            rendered_content: String::new(),
            summary: String::new(),
            publish_date: Local::now(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_posts() {
        assert!(aggregate_tags(&[]).is_empty());
    }

    #[test]
    fn test_posts_without_tags() {
        let posts = vec![post_with_tags("One", &[]), post_with_tags("Two", &[])];
        assert!(aggregate_tags(&posts).is_empty());
    }

    #[test]
    fn test_distinct_sorted_tags() {
        let posts = vec![
            post_with_tags("One", &["tag1", "tag2"]),
            post_with_tags("Two", &["tag2", "tag3"]),
            post_with_tags("Three", &["tag1", "tag3"]),
        ];
        assert_eq!(aggregate_tags(&posts), vec!["tag1", "tag2", "tag3"]);
    }

    #[test]
    fn test_case_insensitive_merge_keeps_first_spelling() {
        let posts = vec![
            post_with_tags("One", &["Tag1", "TAG2"]),
            post_with_tags("Two", &["tag2", "Tag3"]),
        ];
        // Uppercase sorts before lowercase in byte order
        assert_eq!(aggregate_tags(&posts), vec!["TAG2", "Tag1", "Tag3"]);
    }

    #[test]
    fn test_duplicates_within_a_post() {
        let posts = vec![post_with_tags("One", &["A", "b", "A", "c"])];
        assert_eq!(aggregate_tags(&posts), vec!["A", "b", "c"]);
    }

    #[test]
    fn test_count_tags() {
        let posts = vec![
            post_with_tags("One", &["Rust", "web"]),
            post_with_tags("Two", &["rust"]),
        ];
        assert_eq!(
            count_tags(&posts),
            vec![("Rust".to_string(), 2), ("web".to_string(), 1)]
        );
    }
}
