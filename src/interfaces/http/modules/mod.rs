//! API modules, one directory per resource.

pub mod auth;
pub mod health;
pub mod users;
