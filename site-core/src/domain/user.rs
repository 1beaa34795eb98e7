use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::form::{FormErrors, max_length, require};

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Letters, digits and `@.+-_` only.
pub fn validate_username(errors: &mut FormErrors, username: &str) {
    if !require(errors, "username", username)
        || !max_length(errors, "username", username, USERNAME_MAX_LENGTH)
    {
        return;
    }
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }
}

pub fn validate_new_password(errors: &mut FormErrors, password1: &str, password2: &str) {
    if !require(errors, "password1", password1) || !require(errors, "password2", password2) {
        return;
    }
    if password1 != password2 {
        errors.add("password2", "The two password fields didn't match.");
        return;
    }
    if password1.chars().count() < PASSWORD_MIN_LENGTH {
        errors.add(
            "password2",
            format!(
                "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
            ),
        );
    }
    if password1.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password2", "This password is entirely numeric.");
    }
}
