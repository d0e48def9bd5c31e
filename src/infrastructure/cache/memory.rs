//! In-memory detail cache with per-entry TTL.
//!
//! Used by tests and single-node development setups where no Redis is
//! available. Expiry is checked lazily on read.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::{DetailCacheInterface, DirectoryResult, UserDetailView};

#[derive(Default)]
pub struct InMemoryDetailCache {
    entries: Mutex<HashMap<i32, (UserDetailView, Instant)>>,
}

impl InMemoryDetailCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DetailCacheInterface for InMemoryDetailCache {
    async fn get(&self, user_id: i32) -> DirectoryResult<Option<UserDetailView>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&user_id) {
            Some((view, expires_at)) if Instant::now() < *expires_at => Ok(Some(view.clone())),
            Some(_) => {
                entries.remove(&user_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        user_id: i32,
        view: &UserDetailView,
        ttl: Duration,
    ) -> DirectoryResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(user_id, (view.clone(), Instant::now() + ttl));
        Ok(())
    }

    async fn invalidate(&self, user_id: i32) -> DirectoryResult<()> {
        self.entries.lock().unwrap().remove(&user_id);
        Ok(())
    }
}
