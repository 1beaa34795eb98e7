#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod user_repository;
