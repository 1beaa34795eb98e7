use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use site_core::domain::form::{FormErrors, max_length, require};
use site_core::DomainError;
use sqlx::FromRow;
use uuid::Uuid;

pub const TITLE_MAX_LENGTH: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

impl News {
    /// Validates and builds a news item; `date` defaults to today (UTC).
    pub fn new(title: String, text: String, date: Option<NaiveDate>) -> Result<Self, DomainError> {
        let mut errors = FormErrors::new();
        if require(&mut errors, "title", &title) {
            max_length(&mut errors, "title", &title, TITLE_MAX_LENGTH);
        }
        require(&mut errors, "text", &text);
        errors.into_result()?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            text,
            date: date.unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}
