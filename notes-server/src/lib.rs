//! Personal notes: every signed-in user keeps a private list of notes,
//! each addressed by a site-wide unique slug.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use sqlx::migrate::Migrator;

pub use presentation::routes::configure;

pub static MIGRATOR: Migrator = sqlx::migrate!();
