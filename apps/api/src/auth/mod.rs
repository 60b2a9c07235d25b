pub mod handlers;
pub mod sessions;
