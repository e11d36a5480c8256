//! Pure aggregation over blog collections.
//!
//! All functions here take a slice and compute a summary without touching
//! I/O, so they are safe to call from any handler or test.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::blog::Blog;

/// Reduced view of a single blog, as reported by [`favorite_blog`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogSummary {
    pub title: String,
    pub author: String,
    pub likes: i64,
}

/// An author together with how many blogs they have written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorBlogCount {
    pub author: String,
    pub blogs: u64,
}

/// An author together with the likes summed over all their blogs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorLikeCount {
    pub author: String,
    pub likes: i64,
}

/// Sum of likes across all blogs. Zero for an empty slice.
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|b| b.likes).sum()
}

/// The blog with the highest like count, or `None` for an empty slice.
/// When several blogs share the maximum, the first one wins.
pub fn favorite_blog(blogs: &[Blog]) -> Option<BlogSummary> {
    blogs
        .iter()
        .reduce(|best, blog| if blog.likes > best.likes { blog } else { best })
        .map(|blog| BlogSummary {
            title: blog.title.clone(),
            author: blog.author.clone(),
            likes: blog.likes,
        })
}

/// The author with the most blogs, or `None` for an empty slice.
/// Ties go to the alphabetically first author, so the result does not
/// depend on input ordering.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for blog in blogs {
        *counts.entry(blog.author.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })
        .map(|(author, blogs)| AuthorBlogCount {
            author: author.to_string(),
            blogs,
        })
}

/// The author whose blogs have collected the most likes in total, or
/// `None` for an empty slice. Same tie-break as [`most_blogs`].
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikeCount> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for blog in blogs {
        *totals.entry(blog.author.as_str()).or_default() += blog.likes;
    }

    totals
        .into_iter()
        .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })
        .map(|(author, likes)| AuthorLikeCount {
            author: author.to_string(),
            likes,
        })
}
