use std::time::Duration;

use async_trait::async_trait;

use super::UserDetailView;
use crate::domain::DirectoryResult;

/// TTL applied to cached detail views.
pub const DETAIL_CACHE_TTL: Duration = Duration::from_secs(4 * 60 * 60);

/// Deterministic cache key for a user's detail view.
pub fn detail_cache_key(user_id: i32) -> String {
    format!("user:detail:{user_id}")
}

/// Read-through, write-refresh cache of [`UserDetailView`] snapshots.
///
/// Failure semantics are asymmetric by design: a failing `get` aborts
/// the read with `DirectoryError::CacheUnavailable`, while failures of
/// `put`/`invalidate` are the caller's to log and ignore — a mutation
/// of the primary store must not fail because the cache is down.
///
/// Misses are not cached and concurrent misses are not de-duplicated.
#[async_trait]
pub trait DetailCacheInterface: Send + Sync {
    async fn get(&self, user_id: i32) -> DirectoryResult<Option<UserDetailView>>;
    async fn put(
        &self,
        user_id: i32,
        view: &UserDetailView,
        ttl: Duration,
    ) -> DirectoryResult<()>;
    async fn invalidate(&self, user_id: i32) -> DirectoryResult<()>;
}
