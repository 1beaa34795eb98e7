#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod note_repository;
