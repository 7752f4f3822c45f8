//! Blog models
//!
//! Posts, authors and tags as stored in `blog_posts`, `blog_authors` and
//! `blog_tags`, plus the `blog_posts_tags` join rows that link them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog post row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    /// Store-assigned identifier
    pub id: String,
    /// Post title
    pub title: String,
    /// Short teaser shown in listings
    #[serde(default)]
    pub preview: String,
    /// Markdown body
    #[serde(default)]
    pub content: String,
    /// Cover image URL
    #[serde(default)]
    pub image_url: String,
    /// Author reference
    #[serde(default)]
    pub author_id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Blog author row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogAuthor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Blog tag row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogTag {
    pub id: String,
    pub name: String,
}

/// Row of the `blog_posts_tags` join table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostTagLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub post_id: String,
    pub tag_id: String,
}

impl PostTagLink {
    pub fn new(post_id: impl Into<String>, tag_id: impl Into<String>) -> Self {
        Self {
            id: None,
            post_id: post_id.into(),
            tag_id: tag_id.into(),
        }
    }
}

/// A post together with its resolved author and tags
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlogPostView {
    #[serde(flatten)]
    pub post: BlogPost,
    /// `None` when the author row is missing
    pub author: Option<BlogAuthor>,
    pub tags: Vec<BlogTag>,
}

impl BlogPostView {
    /// Whether the post carries the tag with the given id
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Case-insensitive match of `query` against title or preview.
    ///
    /// An empty query matches every post.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.post.title.to_lowercase().contains(&query)
            || self.post.preview.to_lowercase().contains(&query)
    }

    pub fn tag_ids(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.id.clone()).collect()
    }
}

/// Fields written when creating or updating a post
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostInput {
    pub title: String,
    pub preview: String,
    pub content: String,
    pub image_url: String,
    pub author_id: String,
    pub updated_at: DateTime<Utc>,
}

/// Fields written when creating an author
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthorInput {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Fields written when creating a tag
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagInput {
    pub name: String,
}
