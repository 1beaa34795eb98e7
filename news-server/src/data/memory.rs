//! In-memory repositories for tests.

use async_trait::async_trait;
use site_core::DomainError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::comment_repository::CommentRepository;
use crate::data::news_repository::NewsRepository;
use crate::domain::comment::Comment;
use crate::domain::news::News;

#[derive(Default)]
pub struct InMemoryNewsRepository {
    items: RwLock<Vec<News>>,
}

impl InMemoryNewsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn create(&self, news: News) -> Result<News, DomainError> {
        self.items.write().await.push(news.clone());
        Ok(news)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<News>, DomainError> {
        Ok(self.items.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<News>, DomainError> {
        let mut items = self.items.read().await.clone();
        items.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        items.truncate(limit);
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepository {
    items: RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }

    /// Overwrites a comment's timestamp, for ordering fixtures.
    pub async fn set_created(&self, id: Uuid, created: chrono::DateTime<chrono::Utc>) {
        if let Some(comment) = self.items.write().await.iter_mut().find(|c| c.id == id) {
            comment.created = created;
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        self.items.write().await.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        Ok(self.items.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn for_news(&self, news_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let mut thread: Vec<Comment> = self
            .items
            .read()
            .await
            .iter()
            .filter(|c| c.news_id == news_id)
            .cloned()
            .collect();
        thread.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(thread)
    }

    async fn update_text(
        &self,
        id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>, DomainError> {
        let mut items = self.items.write().await;
        Ok(items
            .iter_mut()
            .find(|c| c.id == id && c.author_id == author_id)
            .map(|c| {
                c.text = text.to_owned();
                c.clone()
            }))
    }

    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|c| !(c.id == id && c.author_id == author_id));
        Ok(items.len() != before)
    }
}
