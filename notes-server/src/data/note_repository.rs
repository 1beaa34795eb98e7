use async_trait::async_trait;
use site_core::DomainError;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::note::{Note, duplicate_slug};

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, note: Note) -> Result<Note, DomainError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError>;
    /// The author's notes in creation order.
    async fn for_author(&self, author_id: Uuid) -> Result<Vec<Note>, DomainError>;
    /// Rewrites title, text and slug of `note` if it still belongs to its author.
    async fn update(&self, note: &Note) -> Result<Option<Note>, DomainError>;
    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, slug: &str, action: &str) -> DomainError {
    let duplicate = e
        .as_database_error()
        .and_then(|db| db.constraint())
        .is_some_and(|c| c == "notes_slug_key");
    if duplicate {
        duplicate_slug(slug)
    } else {
        error!("failed to {} note {}: {}", action, slug, e);
        DomainError::from(e)
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn create(&self, note: Note) -> Result<Note, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, title, text, slug, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.text)
        .bind(&note.slug)
        .bind(note.author_id)
        .bind(note.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &note.slug, "create"))?;

        info!(note_id = %note.id, slug = %note.slug, author_id = %note.author_id, "note created");
        Ok(note)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id, created_at
            FROM notes WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_slug {}: {}", slug, e);
            DomainError::from(e)
        })
    }

    async fn for_author(&self, author_id: Uuid) -> Result<Vec<Note>, DomainError> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id, created_at
            FROM notes
            WHERE author_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing notes of {}: {}", author_id, e);
            DomainError::from(e)
        })
    }

    async fn update(&self, note: &Note) -> Result<Option<Note>, DomainError> {
        let updated = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $1, text = $2, slug = $3
            WHERE id = $4 AND author_id = $5
            RETURNING id, title, text, slug, author_id, created_at
            "#,
        )
        .bind(&note.title)
        .bind(&note.text)
        .bind(&note.slug)
        .bind(note.id)
        .bind(note.author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &note.slug, "update"))?;

        if updated.is_some() {
            info!(note_id = %note.id, slug = %note.slug, "note updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM notes WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete note {}: {}", id, e);
                DomainError::from(e)
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(note_id = %id, "note deleted");
        }
        Ok(removed)
    }
}
