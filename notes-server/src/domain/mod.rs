pub mod note;
pub mod slug;
