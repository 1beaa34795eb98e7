pub mod dto;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod server;
pub mod utils;
