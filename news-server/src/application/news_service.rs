use std::sync::Arc;

use chrono::NaiveDate;
use site_core::DomainError;
use tracing::instrument;
use uuid::Uuid;

use crate::data::comment_repository::CommentRepository;
use crate::data::news_repository::NewsRepository;
use crate::domain::comment::Comment;
use crate::domain::news::News;

#[derive(Clone)]
pub struct NewsService {
    news: Arc<dyn NewsRepository>,
    comments: Arc<dyn CommentRepository>,
    page_size: usize,
}

impl NewsService {
    pub fn new(
        news: Arc<dyn NewsRepository>,
        comments: Arc<dyn CommentRepository>,
        page_size: usize,
    ) -> Self {
        Self {
            news,
            comments,
            page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The home feed: newest first, capped at the page size.
    pub async fn home(&self) -> Result<Vec<News>, DomainError> {
        self.news.latest(self.page_size).await
    }

    pub async fn get_news(&self, id: Uuid) -> Result<News, DomainError> {
        self.news
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("news", id))
    }

    /// A news item with its comment thread, oldest comment first.
    pub async fn detail(&self, id: Uuid) -> Result<(News, Vec<Comment>), DomainError> {
        let news = self.get_news(id).await?;
        let comments = self.comments.for_news(id).await?;
        Ok((news, comments))
    }

    #[instrument(skip(self, text))]
    pub async fn publish(
        &self,
        title: String,
        text: String,
        date: Option<NaiveDate>,
    ) -> Result<News, DomainError> {
        let news = News::new(title, text, date)?;
        self.news.create(news).await
    }
}
