//! Shared plumbing for the news and notes services: configuration, logging,
//! users and sessions, the identity middleware and the error type every
//! handler returns.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::auth_service::AuthService;
pub use domain::error::DomainError;
pub use domain::form::FormErrors;
pub use domain::user::User;
pub use presentation::identity::{AuthenticatedUser, MaybeUser};
