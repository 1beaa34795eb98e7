use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::form::FormErrors;
use crate::presentation::utils::login_url_with_next;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(Uuid),
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    /// Also returned when the record exists but belongs to someone else.
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },
    #[error("invalid form data")]
    Validation(FormErrors),
    #[error("login required")]
    LoginRequired { next: String },
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        DomainError::NotFound {
            resource,
            key: key.to_string(),
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Internal(format!("database error: {err}"))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::UserNotFound(_) | DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::LoginRequired { .. } => StatusCode::FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let DomainError::LoginRequired { next } = self {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, login_url_with_next(next)))
                .finish();
        }

        // Internal details stay in the logs.
        let message = match self {
            DomainError::Internal(_) => "internal error".to_owned(),
            DomainError::NotFound { .. } | DomainError::UserNotFound(_) => "not found".to_owned(),
            other => other.to_string(),
        };
        let details = match self {
            DomainError::Validation(errors) => Some(json!({ "errors": errors })),
            DomainError::UserAlreadyExists(username) => Some(json!({ "username": username })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
