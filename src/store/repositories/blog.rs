//! Blog repository
//!
//! Posts, authors, tags and the `blog_posts_tags` links between posts and
//! tags. Reads of the post list fetch the four tables concurrently and
//! join them in memory.

use crate::models::{
    AuthorInput, BlogAuthor, BlogPost, BlogPostView, BlogTag, PostInput, PostTagLink, TagInput,
};
use crate::store::{first_row, from_rows, tables, to_row, DynStore, Filter, Query, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Blog repository trait
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All posts, newest first, with author and tags resolved
    async fn list_posts(&self) -> Result<Vec<BlogPostView>, StoreError>;

    /// One post with author and tags
    async fn get_post(&self, id: &str) -> Result<Option<BlogPostView>, StoreError>;

    /// Authors ordered by name
    async fn list_authors(&self) -> Result<Vec<BlogAuthor>, StoreError>;

    /// Tags ordered by name
    async fn list_tags(&self) -> Result<Vec<BlogTag>, StoreError>;

    async fn create_post(&self, input: &PostInput) -> Result<BlogPost, StoreError>;

    async fn update_post(&self, id: &str, input: &PostInput) -> Result<BlogPost, StoreError>;

    /// Delete a post; its tag links go with it
    async fn delete_post(&self, id: &str) -> Result<(), StoreError>;

    /// Link a post to each of the given tags
    async fn add_post_tags(&self, post_id: &str, tag_ids: &[String]) -> Result<(), StoreError>;

    /// Remove every tag link of a post
    async fn clear_post_tags(&self, post_id: &str) -> Result<(), StoreError>;

    async fn create_author(&self, input: &AuthorInput) -> Result<BlogAuthor, StoreError>;

    async fn create_tag(&self, input: &TagInput) -> Result<BlogTag, StoreError>;
}

/// `DataStore`-backed blog repository
pub struct StoreBlogRepository {
    store: DynStore,
}

impl StoreBlogRepository {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(store: DynStore) -> Arc<dyn BlogRepository> {
        Arc::new(Self::new(store))
    }

    async fn links(&self, post_id: Option<&str>) -> Result<Vec<PostTagLink>, StoreError> {
        let mut query = Query::new();
        if let Some(id) = post_id {
            query = query.filter("post_id", id);
        }
        from_rows(self.store.select(tables::BLOG_POSTS_TAGS, &query).await?)
    }
}

/// Attach authors and tags to posts, keeping the post order.
///
/// Tags on each post keep the order of `tags`, so callers passing a
/// name-ordered tag list get name-ordered tags per post.
fn assemble(
    posts: Vec<BlogPost>,
    authors: &[BlogAuthor],
    tags: &[BlogTag],
    links: &[PostTagLink],
) -> Vec<BlogPostView> {
    let authors: HashMap<&str, &BlogAuthor> =
        authors.iter().map(|a| (a.id.as_str(), a)).collect();

    posts
        .into_iter()
        .map(|post| {
            let post_tags = tags
                .iter()
                .filter(|tag| {
                    links
                        .iter()
                        .any(|link| link.post_id == post.id && link.tag_id == tag.id)
                })
                .cloned()
                .collect();
            let author = authors.get(post.author_id.as_str()).map(|a| (*a).clone());
            BlogPostView {
                post,
                author,
                tags: post_tags,
            }
        })
        .collect()
}

#[async_trait]
impl BlogRepository for StoreBlogRepository {
    async fn list_posts(&self) -> Result<Vec<BlogPostView>, StoreError> {
        let posts_query = Query::new().order_by("created_at", false);
        let (posts, authors, tags, links) = tokio::try_join!(
            self.store.select(tables::BLOG_POSTS, &posts_query),
            self.list_authors(),
            self.list_tags(),
            self.links(None),
        )?;
        let posts: Vec<BlogPost> = from_rows(posts)?;
        Ok(assemble(posts, &authors, &tags, &links))
    }

    async fn get_post(&self, id: &str) -> Result<Option<BlogPostView>, StoreError> {
        let query = Query::new().filter("id", id).limit(1);
        let (rows, tags, links) = tokio::try_join!(
            self.store.select(tables::BLOG_POSTS, &query),
            self.list_tags(),
            self.links(Some(id)),
        )?;
        let posts: Vec<BlogPost> = from_rows(rows)?;
        let Some(post) = posts.into_iter().next() else {
            return Ok(None);
        };

        let author_rows = self
            .store
            .select(
                tables::BLOG_AUTHORS,
                &Query::new().filter("id", post.author_id.clone()).limit(1),
            )
            .await?;
        let authors: Vec<BlogAuthor> = from_rows(author_rows)?;

        Ok(assemble(vec![post], &authors, &tags, &links).into_iter().next())
    }

    async fn list_authors(&self) -> Result<Vec<BlogAuthor>, StoreError> {
        let rows = self
            .store
            .select(tables::BLOG_AUTHORS, &Query::new().order_by("name", true))
            .await?;
        from_rows(rows)
    }

    async fn list_tags(&self) -> Result<Vec<BlogTag>, StoreError> {
        let rows = self
            .store
            .select(tables::BLOG_TAGS, &Query::new().order_by("name", true))
            .await?;
        from_rows(rows)
    }

    async fn create_post(&self, input: &PostInput) -> Result<BlogPost, StoreError> {
        let rows = self
            .store
            .insert(tables::BLOG_POSTS, vec![to_row(input)?])
            .await?;
        first_row(rows, "created post")
    }

    async fn update_post(&self, id: &str, input: &PostInput) -> Result<BlogPost, StoreError> {
        let rows = self
            .store
            .update(tables::BLOG_POSTS, &[Filter::eq("id", id)], to_row(input)?)
            .await?;
        first_row(rows, &format!("post {id}"))
    }

    async fn delete_post(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .delete(tables::BLOG_POSTS, &[Filter::eq("id", id)])
            .await
    }

    async fn add_post_tags(&self, post_id: &str, tag_ids: &[String]) -> Result<(), StoreError> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let rows = tag_ids
            .iter()
            .map(|tag_id| to_row(&PostTagLink::new(post_id, tag_id.as_str())))
            .collect::<Result<Vec<_>, _>>()?;
        self.store.insert(tables::BLOG_POSTS_TAGS, rows).await?;
        Ok(())
    }

    async fn clear_post_tags(&self, post_id: &str) -> Result<(), StoreError> {
        self.store
            .delete(tables::BLOG_POSTS_TAGS, &[Filter::eq("post_id", post_id)])
            .await
    }

    async fn create_author(&self, input: &AuthorInput) -> Result<BlogAuthor, StoreError> {
        let rows = self
            .store
            .insert(tables::BLOG_AUTHORS, vec![to_row(input)?])
            .await?;
        first_row(rows, "created author")
    }

    async fn create_tag(&self, input: &TagInput) -> Result<BlogTag, StoreError> {
        let rows = self
            .store
            .insert(tables::BLOG_TAGS, vec![to_row(input)?])
            .await?;
        first_row(rows, "created tag")
    }
}
