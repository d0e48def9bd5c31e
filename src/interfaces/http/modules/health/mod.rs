//! Health module — liveness and component checks

pub mod handlers;

pub use handlers::*;
