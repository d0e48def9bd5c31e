//! # User Directory Service
//!
//! User directory with role-hierarchy access control and cached user
//! detail projections.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: The `UserDirectory` service orchestrating stores,
//!   cache and access policy
//! - **infrastructure**: External concerns (database, Redis cache, crypto)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
