use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use site_core::DomainError;
use site_core::domain::form::{FormErrors, max_length, require};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::slug::{SLUG_MAX_LENGTH, slugify, validate_slug};

pub const TITLE_MAX_LENGTH: usize = 100;

/// Appended to a slug that another note already uses.
pub const WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

pub const EMPTY_SLUG: &str = "Could not derive a slug from the title, please enter one.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(draft: NoteDraft, slug: String, author_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            text: draft.text,
            slug,
            author_id,
            created_at: Utc::now(),
        }
    }
}

/// The validation error for a slug that is already taken.
pub fn duplicate_slug(slug: &str) -> DomainError {
    DomainError::Validation(FormErrors::single("slug", format!("{slug}{WARNING}")))
}

/// Note fields as submitted; `slug` may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteDraft {
    /// Checks the fields and settles the slug to store: the submitted one,
    /// or one derived from the title when left blank.
    pub fn clean(&self) -> Result<String, DomainError> {
        let mut errors = FormErrors::new();
        let title_ok = require(&mut errors, "title", &self.title)
            && max_length(&mut errors, "title", &self.title, TITLE_MAX_LENGTH);
        require(&mut errors, "text", &self.text);

        let submitted = self.slug.trim();
        let slug = if submitted.is_empty() {
            let derived = slugify(&self.title);
            if derived.is_empty() && title_ok {
                errors.add("slug", EMPTY_SLUG);
            }
            derived
        } else {
            if max_length(&mut errors, "slug", submitted, SLUG_MAX_LENGTH) {
                validate_slug(&mut errors, "slug", submitted);
            }
            submitted.to_owned()
        };

        errors.into_result()?;
        Ok(slug)
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
        }
    }
}
