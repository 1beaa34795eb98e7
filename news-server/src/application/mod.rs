pub mod comment_service;
pub mod news_service;
