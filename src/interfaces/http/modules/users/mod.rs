//! Users module — directory CRUD and listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
