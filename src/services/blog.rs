//! Blog service
//!
//! Public listing and filtering of posts, plus the admin operations on
//! posts, authors and tags. Admin drafts are validated completely before
//! any store call is made.

use super::{non_blank, require, SaveOutcome, ServiceError, ValidationError};
use crate::models::{AuthorInput, BlogAuthor, BlogPostView, BlogTag, PostInput, TagInput};
use crate::store::repositories::BlogRepository;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Editable state of a post in the admin form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    /// Empty for a post that has not been saved yet
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub author_id: String,
    /// Selected tag ids
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

impl PostDraft {
    /// Draft pre-filled from a stored post
    pub fn from_view(view: &BlogPostView) -> Self {
        Self {
            id: view.post.id.clone(),
            title: view.post.title.clone(),
            preview: view.post.preview.clone(),
            content: view.post.content.clone(),
            image_url: view.post.image_url.clone(),
            author_id: view.post.author_id.clone(),
            tag_ids: view.tag_ids(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// Title, preview, content, image URL and author, in that order
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", "Title", &self.title)?;
        require("preview", "Preview", &self.preview)?;
        require("content", "Content", &self.content)?;
        require("image_url", "Image URL", &self.image_url)?;
        require("author_id", "Author", &self.author_id)?;
        Ok(())
    }

    fn to_input(&self) -> PostInput {
        PostInput {
            title: self.title.clone(),
            preview: self.preview.clone(),
            content: self.content.clone(),
            image_url: self.image_url.clone(),
            author_id: self.author_id.clone(),
            updated_at: Utc::now(),
        }
    }
}

/// New author form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl AuthorDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", "Author name", &self.name)?;
        require("role", "Author role", &self.role)?;
        Ok(())
    }
}

/// New tag form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagDraft {
    #[serde(default)]
    pub name: String,
}

impl TagDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", "Tag name", &self.name)
    }
}

/// Selecting the already-selected tag clears the filter
pub fn toggle_tag(current: Option<&str>, clicked: &str) -> Option<String> {
    match current {
        Some(selected) if selected == clicked => None,
        _ => Some(clicked.to_string()),
    }
}

/// Posts carrying `tag_id` (when set) whose title or preview contains `search`
pub fn filter_posts<'a>(
    posts: &'a [BlogPostView],
    tag_id: Option<&str>,
    search: &str,
) -> Vec<&'a BlogPostView> {
    posts
        .iter()
        .filter(|post| tag_id.map_or(true, |id| post.has_tag(id)))
        .filter(|post| post.matches_search(search))
        .collect()
}

/// Blog service
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// Posts newest first and tags by name, fetched together
    pub async fn list_posts_and_tags(
        &self,
    ) -> Result<(Vec<BlogPostView>, Vec<BlogTag>), ServiceError> {
        let (posts, tags) = tokio::try_join!(self.repo.list_posts(), self.repo.list_tags())?;
        Ok((posts, tags))
    }

    pub async fn list_posts(&self) -> Result<Vec<BlogPostView>, ServiceError> {
        Ok(self.repo.list_posts().await?)
    }

    pub async fn list_authors(&self) -> Result<Vec<BlogAuthor>, ServiceError> {
        Ok(self.repo.list_authors().await?)
    }

    pub async fn list_tags(&self) -> Result<Vec<BlogTag>, ServiceError> {
        Ok(self.repo.list_tags().await?)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<BlogPostView>, ServiceError> {
        Ok(self.repo.get_post(id).await?)
    }

    /// Validate and store a post, then replace its tag links.
    ///
    /// New posts are inserted and linked to the selected tags. Existing posts
    /// are updated, their links removed, and the selected links inserted.
    pub async fn save_post(&self, draft: &PostDraft) -> Result<SaveOutcome, ServiceError> {
        draft.validate()?;
        let input = draft.to_input();

        if draft.is_new() {
            let post = self.repo.create_post(&input).await?;
            self.repo.add_post_tags(&post.id, &draft.tag_ids).await?;
            tracing::info!(post_id = %post.id, "Blog post created");
            Ok(SaveOutcome::Created)
        } else {
            let post = self.repo.update_post(&draft.id, &input).await?;
            self.repo.clear_post_tags(&post.id).await?;
            self.repo.add_post_tags(&post.id, &draft.tag_ids).await?;
            tracing::info!(post_id = %post.id, "Blog post updated");
            Ok(SaveOutcome::Updated)
        }
    }

    /// Delete a post; the store drops its tag links
    pub async fn delete_post(&self, id: &str) -> Result<(), ServiceError> {
        self.repo.delete_post(id).await?;
        tracing::info!(post_id = %id, "Blog post deleted");
        Ok(())
    }

    pub async fn create_author(&self, draft: &AuthorDraft) -> Result<BlogAuthor, ServiceError> {
        draft.validate()?;
        let input = AuthorInput {
            name: draft.name.trim().to_string(),
            role: draft.role.trim().to_string(),
            avatar_url: non_blank(&draft.avatar_url),
        };
        Ok(self.repo.create_author(&input).await?)
    }

    pub async fn create_tag(&self, draft: &TagDraft) -> Result<BlogTag, ServiceError> {
        draft.validate()?;
        let input = TagInput {
            name: draft.name.trim().to_string(),
        };
        Ok(self.repo.create_tag(&input).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::repositories::StoreBlogRepository;
    use crate::store::{create_test_store, MemoryStore};
    use proptest::prelude::*;

    fn setup_service() -> BlogService {
        BlogService::new(StoreBlogRepository::boxed(create_test_store()))
    }

    fn demo_service() -> BlogService {
        BlogService::new(StoreBlogRepository::boxed(Arc::new(
            MemoryStore::with_demo_data(),
        )))
    }

    fn complete_draft(author_id: &str) -> PostDraft {
        PostDraft {
            id: String::new(),
            title: "Summer Reading".to_string(),
            preview: "Books to read before senior year".to_string(),
            content: "# List\n- One".to_string(),
            image_url: "https://example.com/books.jpg".to_string(),
            author_id: author_id.to_string(),
            tag_ids: Vec::new(),
        }
    }

    #[test]
    fn test_validation_order() {
        let mut draft = PostDraft::default();
        assert_eq!(draft.validate().unwrap_err().message, "Title is required");
        draft.title = "T".into();
        assert_eq!(draft.validate().unwrap_err().message, "Preview is required");
        draft.preview = "P".into();
        assert_eq!(draft.validate().unwrap_err().message, "Content is required");
        draft.content = "C".into();
        assert_eq!(draft.validate().unwrap_err().message, "Image URL is required");
        draft.image_url = "I".into();
        assert_eq!(draft.validate().unwrap_err().message, "Author is required");
        draft.author_id = "a".into();
        assert!(draft.validate().is_ok());
    }

    #[tokio::test]
    async fn test_new_post_without_title_is_not_inserted() {
        let service = setup_service();
        let mut draft = complete_draft("a1");
        draft.title = "   ".to_string();

        let err = service.save_post(&draft).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref v) if v.message == "Title is required"));
        assert!(service.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_new_then_update_replaces_tags() {
        let service = setup_service();
        let author = service
            .create_author(&AuthorDraft {
                name: "Emma".into(),
                role: "Coach".into(),
                avatar_url: "  ".into(),
            })
            .await
            .unwrap();
        assert!(author.avatar_url.is_none());
        let sat = service.create_tag(&TagDraft { name: "SAT".into() }).await.unwrap();
        let act = service.create_tag(&TagDraft { name: "ACT".into() }).await.unwrap();

        let mut draft = complete_draft(&author.id);
        draft.tag_ids = vec![sat.id.clone()];
        assert_eq!(service.save_post(&draft).await.unwrap(), SaveOutcome::Created);

        let posts = service.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        let mut draft = PostDraft::from_view(&posts[0]);
        draft.tag_ids = vec![act.id.clone()];
        draft.title = "Summer Reading List".into();
        assert_eq!(service.save_post(&draft).await.unwrap(), SaveOutcome::Updated);

        let view = service.get_post(&draft.id).await.unwrap().unwrap();
        assert_eq!(view.post.title, "Summer Reading List");
        assert_eq!(view.tag_ids(), vec![act.id]);
    }

    #[tokio::test]
    async fn test_author_and_tag_validation() {
        let service = setup_service();
        let err = service
            .create_author(&AuthorDraft { name: "X".into(), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Author role is required");
        let err = service.create_tag(&TagDraft::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Tag name is required");
    }

    #[tokio::test]
    async fn test_filter_by_tag_and_search() {
        let service = demo_service();
        let (posts, _tags) = service.list_posts_and_tags().await.unwrap();

        let sat = filter_posts(&posts, Some("tag-sat"), "");
        assert_eq!(sat.len(), 1);
        assert_eq!(sat[0].post.id, "post-sat-act");

        let essay = filter_posts(&posts, None, "ESSAY");
        assert!(essay.iter().all(|p| p.post.id == "post-essay"));

        assert!(filter_posts(&posts, Some("tag-sat"), "essay").is_empty());
        assert_eq!(filter_posts(&posts, None, "").len(), posts.len());
    }

    #[tokio::test]
    async fn test_delete_post() {
        let service = demo_service();
        service.delete_post("post-essay").await.unwrap();
        assert!(service.get_post("post-essay").await.unwrap().is_none());
    }

    #[test]
    fn test_toggle_tag() {
        assert_eq!(toggle_tag(None, "t1").as_deref(), Some("t1"));
        assert_eq!(toggle_tag(Some("t1"), "t1"), None);
        assert_eq!(toggle_tag(Some("t1"), "t2").as_deref(), Some("t2"));
    }

    proptest! {
        #[test]
        fn property_toggle_twice_restores(tag in "[a-z0-9-]{1,12}") {
            let once = toggle_tag(None, &tag);
            prop_assert_eq!(toggle_tag(once.as_deref(), &tag), None);
        }
    }
}
