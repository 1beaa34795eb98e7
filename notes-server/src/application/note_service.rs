use std::sync::Arc;

use site_core::{AuthenticatedUser, DomainError};
use tracing::instrument;
use uuid::Uuid;

use crate::data::note_repository::NoteRepository;
use crate::domain::note::{Note, NoteDraft, duplicate_slug};

#[derive(Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    pub async fn list(&self, actor: &AuthenticatedUser) -> Result<Vec<Note>, DomainError> {
        self.notes.for_author(actor.id).await
    }

    /// The actor's note under `slug`; other people's notes look missing.
    pub async fn get_own(&self, actor: &AuthenticatedUser, slug: &str) -> Result<Note, DomainError> {
        match self.notes.find_by_slug(slug).await? {
            Some(note) if note.author_id == actor.id => Ok(note),
            _ => Err(DomainError::not_found("note", slug)),
        }
    }

    async fn ensure_slug_free(&self, slug: &str, owner: Option<Uuid>) -> Result<(), DomainError> {
        match self.notes.find_by_slug(slug).await? {
            Some(taken) if Some(taken.id) != owner => Err(duplicate_slug(slug)),
            _ => Ok(()),
        }
    }

    #[instrument(skip(self, actor, draft), fields(author = %actor.username))]
    pub async fn add(&self, actor: &AuthenticatedUser, draft: NoteDraft) -> Result<Note, DomainError> {
        let slug = draft.clean()?;
        self.ensure_slug_free(&slug, None).await?;
        self.notes.create(Note::new(draft, slug, actor.id)).await
    }

    #[instrument(skip(self, actor, draft), fields(author = %actor.username))]
    pub async fn edit(
        &self,
        actor: &AuthenticatedUser,
        slug: &str,
        draft: NoteDraft,
    ) -> Result<Note, DomainError> {
        let mut note = self.get_own(actor, slug).await?;
        let new_slug = draft.clean()?;
        self.ensure_slug_free(&new_slug, Some(note.id)).await?;

        note.title = draft.title;
        note.text = draft.text;
        note.slug = new_slug;
        self.notes
            .update(&note)
            .await?
            .ok_or_else(|| DomainError::not_found("note", slug))
    }

    /// Deletes the actor's note and returns it.
    #[instrument(skip(self, actor), fields(author = %actor.username))]
    pub async fn delete(&self, actor: &AuthenticatedUser, slug: &str) -> Result<Note, DomainError> {
        let note = self.get_own(actor, slug).await?;
        if !self.notes.delete(note.id, actor.id).await? {
            return Err(DomainError::not_found("note", slug));
        }
        Ok(note)
    }
}
