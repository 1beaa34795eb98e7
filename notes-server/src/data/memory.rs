//! In-memory note store for tests.

use async_trait::async_trait;
use site_core::DomainError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::note_repository::NoteRepository;
use crate::domain::note::{Note, duplicate_slug};

#[derive(Default)]
pub struct InMemoryNoteRepository {
    items: RwLock<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, note: Note) -> Result<Note, DomainError> {
        let mut items = self.items.write().await;
        if items.iter().any(|n| n.slug == note.slug) {
            return Err(duplicate_slug(&note.slug));
        }
        items.push(note.clone());
        Ok(note)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError> {
        Ok(self.items.read().await.iter().find(|n| n.slug == slug).cloned())
    }

    async fn for_author(&self, author_id: Uuid) -> Result<Vec<Note>, DomainError> {
        let mut notes: Vec<Note> = self
            .items
            .read()
            .await
            .iter()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(notes)
    }

    async fn update(&self, note: &Note) -> Result<Option<Note>, DomainError> {
        let mut items = self.items.write().await;
        if items.iter().any(|n| n.slug == note.slug && n.id != note.id) {
            return Err(duplicate_slug(&note.slug));
        }
        Ok(items
            .iter_mut()
            .find(|n| n.id == note.id && n.author_id == note.author_id)
            .map(|stored| {
                stored.title = note.title.clone();
                stored.text = note.text.clone();
                stored.slug = note.slug.clone();
                stored.clone()
            }))
    }

    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|n| !(n.id == id && n.author_id == author_id));
        Ok(items.len() != before)
    }
}
