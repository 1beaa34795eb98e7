pub mod comment;
pub mod news;
