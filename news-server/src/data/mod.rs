pub mod comment_repository;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod news_repository;
