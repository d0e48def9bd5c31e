//! Detail-cache implementations: Redis for deployments, in-memory for
//! tests and development.

pub mod memory;
pub mod redis;

pub use memory::InMemoryDetailCache;
pub use redis::RedisDetailCache;
