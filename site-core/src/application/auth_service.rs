use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::form::{FormErrors, NON_FIELD_ERRORS, require};
use crate::domain::user::{User, validate_new_password, validate_username};
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    /// Resolves a session token to its user; `None` for anything unusable.
    pub async fn user_from_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let Some(user_id) = self.keys.verify_token(token).ok().and_then(|c| c.user_id()) else {
            return Ok(None);
        };
        self.repo.find_by_id(user_id).await
    }

    /// Issues a session token without checking a password.
    pub fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.keys
            .generate_token(user.id)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }

    #[instrument(skip(self, password1, password2))]
    pub async fn register(
        &self,
        username: &str,
        password1: &str,
        password2: &str,
    ) -> Result<User, DomainError> {
        let username = username.trim();
        let mut errors = FormErrors::new();
        validate_username(&mut errors, username);
        validate_new_password(&mut errors, password1, password2);
        errors.into_result()?;

        if self.repo.find_by_username(username).await?.is_some() {
            return Err(DomainError::Validation(FormErrors::single(
                "username",
                DUPLICATE_USERNAME,
            )));
        }

        let hash =
            hash_password(password1).map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = User::new(username.to_owned(), hash);
        match self.repo.create(user).await {
            Err(DomainError::UserAlreadyExists(_)) => Err(DomainError::Validation(
                FormErrors::single("username", DUPLICATE_USERNAME),
            )),
            other => other,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let mut errors = FormErrors::new();
        require(&mut errors, "username", username);
        require(&mut errors, "password", password);
        errors.into_result()?;

        let invalid = || DomainError::Validation(FormErrors::single(NON_FIELD_ERRORS, INVALID_LOGIN));
        let user = self
            .repo
            .find_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        let valid = verify_password(password, &user.password_hash).map_err(|_| invalid())?;
        if !valid {
            return Err(invalid());
        }

        self.issue_token(&user)
    }
}
