//! Redis-backed detail cache.
//!
//! Holds a process-wide `ConnectionManager` created once at startup; the
//! manager reconnects on its own after transient outages. Values are the
//! serde-JSON form of [`UserDetailView`] under `user:detail:{id}` keys.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::warn;

use crate::domain::{
    detail_cache_key, DetailCacheInterface, DirectoryError, DirectoryResult, UserDetailView,
};

#[derive(Clone)]
pub struct RedisDetailCache {
    conn: ConnectionManager,
}

impl RedisDetailCache {
    /// Connect to Redis at `url` (e.g. `redis://127.0.0.1:6379/`).
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

fn cache_err(e: redis::RedisError) -> DirectoryError {
    DirectoryError::CacheUnavailable(e.to_string())
}

#[async_trait]
impl DetailCacheInterface for RedisDetailCache {
    async fn get(&self, user_id: i32) -> DirectoryResult<Option<UserDetailView>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(detail_cache_key(user_id))
            .await
            .map_err(cache_err)?;

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(view) => Ok(Some(view)),
                Err(e) => {
                    // An unreadable entry is treated as a miss; the read
                    // path will rebuild and overwrite it.
                    warn!(user_id, error = %e, "Discarding undecodable cached user detail");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        user_id: i32,
        view: &UserDetailView,
        ttl: Duration,
    ) -> DirectoryResult<()> {
        let json = serde_json::to_string(view)
            .map_err(|e| DirectoryError::CacheUnavailable(e.to_string()))?;
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(detail_cache_key(user_id), json, ttl.as_secs())
            .await
            .map_err(cache_err)
    }

    async fn invalidate(&self, user_id: i32) -> DirectoryResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(detail_cache_key(user_id))
            .await
            .map_err(cache_err)
    }
}
