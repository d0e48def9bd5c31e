use async_trait::async_trait;

use super::{User, UserListQuery};
use crate::domain::DirectoryResult;

/// Identity store behind the directory. Owns credential storage and
/// verification; the directory never sees a password hash.
///
/// Mutations that the store rejects surface as
/// `DirectoryError::Store` carrying the store's own descriptions.
#[async_trait]
pub trait UserStoreInterface: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DirectoryResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DirectoryResult<Option<User>>;

    /// Check a username/password pair, returning the user on success.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DirectoryResult<Option<User>>;

    /// Persist a new user and its credential. The `id` of the input is
    /// ignored; the stored user with its assigned id is returned.
    async fn create(&self, user: User, password: &str) -> DirectoryResult<User>;

    async fn update(&self, user: &User) -> DirectoryResult<User>;
    async fn delete(&self, user: &User) -> DirectoryResult<()>;

    /// Filtered page of users plus the total match count before paging.
    async fn list(&self, query: &UserListQuery) -> DirectoryResult<(Vec<User>, u64)>;
}
