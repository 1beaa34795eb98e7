use async_trait::async_trait;
use site_core::DomainError;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::comment::Comment;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: Comment) -> Result<Comment, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError>;
    /// Oldest first.
    async fn for_news(&self, news_id: Uuid) -> Result<Vec<Comment>, DomainError>;
    /// `None` when no comment with this id belongs to `author_id`.
    async fn update_text(
        &self,
        id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>, DomainError>;
    /// `false` when no comment with this id belongs to `author_id`.
    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, news_id, author_id, text, created)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id)
        .bind(comment.news_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .bind(comment.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create comment: {}", e);
            DomainError::from(e)
        })?;

        info!(comment_id = %comment.id, news_id = %comment.news_id, author_id = %comment.author_id, "comment created");
        Ok(comment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, news_id, author_id, text, created
            FROM comments WHERE id = $1
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

    async fn for_news(&self, news_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, news_id, author_id, text, created
            FROM comments
            WHERE news_id = $1
            ORDER BY created, id
            "#,
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching comments of {}: {}", news_id, e);
            DomainError::from(e)
        })
    }

    async fn update_text(
        &self,
        id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>, DomainError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET text = $1
            WHERE id = $2 AND author_id = $3
            RETURNING id, news_id, author_id, text, created
            "#,
        )
        .bind(text)
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update comment {}: {}", id, e);
            DomainError::from(e)
        })?;

        if comment.is_some() {
            info!(comment_id = %id, "comment updated");
        }
        Ok(comment)
    }

    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete comment {}: {}", id, e);
                DomainError::from(e)
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(comment_id = %id, "comment deleted");
        }
        Ok(removed)
    }
}
