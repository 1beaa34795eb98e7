//! The news site: a public feed of news items, each with a comment thread
//! that signed-in readers contribute to.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use sqlx::migrate::Migrator;

pub use presentation::routes::configure;

pub static MIGRATOR: Migrator = sqlx::migrate!();
