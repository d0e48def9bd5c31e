//! External concerns: database, cache, crypto.

pub mod cache;
pub mod crypto;
pub mod database;

pub use cache::{InMemoryDetailCache, RedisDetailCache};
pub use database::{init_database, DatabaseConfig};
