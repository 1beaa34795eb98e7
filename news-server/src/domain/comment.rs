use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use site_core::domain::form::{FormErrors, require};
use sqlx::FromRow;
use uuid::Uuid;

pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];
pub const WARNING: &str = "Не ругайтесь!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Comment {
    pub fn new(news_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            news_id,
            author_id,
            text,
            created: Utc::now(),
        }
    }
}

/// Substring filter for comment text.
#[derive(Debug, Clone, Copy)]
pub struct BannedWords {
    words: &'static [&'static str],
    case_insensitive: bool,
}

impl Default for BannedWords {
    fn default() -> Self {
        Self::new(&BAD_WORDS, false)
    }
}

impl BannedWords {
    pub fn new(words: &'static [&'static str], case_insensitive: bool) -> Self {
        Self {
            words,
            case_insensitive,
        }
    }

    /// First banned word contained in `text`.
    pub fn find(&self, text: &str) -> Option<&'static str> {
        if self.case_insensitive {
            let lowered = text.to_lowercase();
            self.words
                .iter()
                .copied()
                .find(|word| lowered.contains(&word.to_lowercase()))
        } else {
            self.words.iter().copied().find(|word| text.contains(word))
        }
    }

    /// Form validation for the `text` field.
    pub fn validate(&self, text: &str) -> FormErrors {
        let mut errors = FormErrors::new();
        if require(&mut errors, "text", text) && self.find(text).is_some() {
            errors.add("text", WARNING);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Какой-то текст, редиска, еще текст", Some("редиска"))]
    #[case("негодяйство", Some("негодяй"))]
    #[case("Текст комментария", None)]
    #[case("Редиска", None)]
    fn default_filter_is_case_sensitive(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(BannedWords::default().find(text), expected);
    }

    #[test]
    fn case_insensitive_filter_folds() {
        let filter = BannedWords::new(&BAD_WORDS, true);
        assert_eq!(filter.find("РЕДИСКА!"), Some("редиска"));
    }

    #[test]
    fn validation_reports_warning_on_text() {
        let errors = BannedWords::default().validate("ты негодяй");
        assert_eq!(errors.field("text"), [WARNING]);
    }

    #[test]
    fn blank_text_is_required_not_banned() {
        let errors = BannedWords::default().validate("  ");
        assert_eq!(errors.field("text"), ["This field is required."]);
    }

    #[test]
    fn clean_text_passes() {
        assert!(BannedWords::default().validate("Новый текст комментария").is_empty());
    }
}
