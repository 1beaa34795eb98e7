use async_trait::async_trait;
use site_core::DomainError;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::news::News;

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn create(&self, news: News) -> Result<News, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<News>, DomainError>;
    /// Most recent first, at most `limit` items.
    async fn latest(&self, limit: usize) -> Result<Vec<News>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresNewsRepository {
    pool: PgPool,
}

impl PostgresNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PostgresNewsRepository {
    async fn create(&self, news: News) -> Result<News, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO news (id, title, text, date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(news.id)
        .bind(&news.title)
        .bind(&news.text)
        .bind(news.date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create news: {}", e);
            DomainError::from(e)
        })?;

        info!(news_id = %news.id, date = %news.date, "news published");
        Ok(news)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<News>, DomainError> {
        sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, text, date
            FROM news WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::from(e)
        })
    }

    async fn latest(&self, limit: usize) -> Result<Vec<News>, DomainError> {
        sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, text, date
            FROM news
            ORDER BY date DESC, id
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching news feed: {}", e);
            DomainError::from(e)
        })
    }
}
