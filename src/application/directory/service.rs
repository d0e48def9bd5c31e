//! User directory service — application-layer orchestration
//!
//! All user CRUD and listing business logic lives here. HTTP handlers
//! should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    AccessPolicy, DetailCacheInterface, DirectoryError, DirectoryResult, EditUserDto,
    ReferenceStoreInterface, RegisterUserDto, User, UserDetailView, UserListEntry, UserListFilter,
    UserListPage, UserListQuery, UserStatus, UserStoreInterface, DETAIL_CACHE_TTL,
};

const DEFAULT_PAGE_SIZE: i32 = 15;

/// Orchestrates lookups, mutations and listing queries against the
/// identity store, reference store and detail cache.
///
/// Generic over the store and cache interfaces so it stays decoupled
/// from the concrete persistence layer.
pub struct UserDirectory<U, R, C>
where
    U: UserStoreInterface,
    R: ReferenceStoreInterface,
    C: DetailCacheInterface,
{
    users: Arc<U>,
    reference: Arc<R>,
    cache: Arc<C>,
}

impl<U, R, C> UserDirectory<U, R, C>
where
    U: UserStoreInterface,
    R: ReferenceStoreInterface,
    C: DetailCacheInterface,
{
    pub fn new(users: Arc<U>, reference: Arc<R>, cache: Arc<C>) -> Self {
        Self {
            users,
            reference,
            cache,
        }
    }

    // ── Single-record read ──────────────────────────────────────

    /// Read-through detail lookup: cache first, then the backing store.
    ///
    /// A cache failure aborts the read with `CacheUnavailable`; it does
    /// not silently fall through to the store. Note that this operation
    /// applies no access check — authorization for single-record reads
    /// is the caller's responsibility.
    pub async fn get_detail(&self, user_id: i32) -> DirectoryResult<UserDetailView> {
        if let Some(view) = self.cache.get(user_id).await? {
            info!(user_id, "User detail served from cache");
            return Ok(view);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DirectoryError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        let view = self.assemble_detail(&user).await?;

        if let Err(e) = self.cache.put(user_id, &view, DETAIL_CACHE_TTL).await {
            warn!(user_id, error = %e, "Failed to cache user detail");
        } else {
            info!(user_id, "User detail cached");
        }

        Ok(view)
    }

    /// Join the user with its role title and optional reference rows.
    /// Shared by the read path and the post-update cache refresh so the
    /// cache only ever holds the canonical detail shape.
    async fn assemble_detail(&self, user: &User) -> DirectoryResult<UserDetailView> {
        let role_title = self
            .reference
            .find_role_by_id(user.role_id)
            .await?
            .map(|r| r.title)
            .unwrap_or_default();

        let address = match user.address_id {
            Some(id) => self.reference.find_address_by_id(id).await?,
            None => None,
        };

        let agent = match user.agent_id {
            Some(id) => self.reference.find_agent_by_id(id).await?,
            None => None,
        };

        let company_info = match user.company_id.as_deref() {
            Some(code) if !code.is_empty() => self.reference.find_company_by_code(code).await?,
            _ => None,
        };

        Ok(UserDetailView {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role_title,
            role_id: user.role_id,
            email: user.email.clone(),
            phone: user.phone.clone(),
            status: user.status,
            company_info,
            address,
            agent,
        })
    }

    // ── Creation ────────────────────────────────────────────────

    /// Register a new user on behalf of `actor`.
    ///
    /// Reference checks run in a fixed order (role, role assignment,
    /// company, agent) so error reporting stays stable; all must pass
    /// before the identity store is touched. Status is forced to
    /// pending regardless of input.
    pub async fn create(&self, registration: RegisterUserDto, actor: &User) -> DirectoryResult<User> {
        if !self.reference.role_exists(registration.role_id).await? {
            warn!(role_id = registration.role_id, "Invalid role for user creation");
            return Err(DirectoryError::Validation("Invalid role".into()));
        }

        if !AccessPolicy::can_assign_role(actor.role_id, registration.role_id) {
            warn!(
                actor_id = actor.id,
                role_id = registration.role_id,
                "Actor not authorized to assign role"
            );
            return Err(DirectoryError::Unauthorized(
                "You are not authorized to assign this role".into(),
            ));
        }

        let company_valid = match registration.company_id.as_deref() {
            Some(code) => self.reference.company_exists(code).await?,
            None => false,
        };
        if !company_valid {
            warn!(company_id = ?registration.company_id, "Invalid company for user creation");
            return Err(DirectoryError::Validation("Invalid company".into()));
        }

        let agent_valid = match registration.agent_id {
            Some(id) => self.reference.agent_exists(id).await?,
            None => false,
        };
        if !agent_valid {
            warn!(agent_id = ?registration.agent_id, "Invalid agent for user creation");
            return Err(DirectoryError::Validation("Invalid agent".into()));
        }

        let user = User {
            id: 0,
            username: registration.username,
            first_name: registration.first_name,
            last_name: registration.last_name,
            email: registration.email,
            phone: registration.phone,
            role_id: registration.role_id,
            address_id: None,
            agent_id: registration.agent_id,
            company_id: registration.company_id,
            agent_permission: registration.agent_permission,
            status: UserStatus::Pending,
        };

        let created = self.users.create(user, &registration.password).await?;
        info!(user_id = created.id, "User created");
        Ok(created)
    }

    // ── Update ──────────────────────────────────────────────────

    /// Partially update a user on behalf of `actor`. Absent or empty
    /// fields leave stored values untouched. On success the cached
    /// detail view is rebuilt and overwritten with a fresh snapshot.
    pub async fn update(
        &self,
        user_id: i32,
        edits: EditUserDto,
        actor: &User,
    ) -> DirectoryResult<User> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DirectoryError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        if !AccessPolicy::can_edit(actor, &user) {
            warn!(actor_id = actor.id, user_id, "Actor not authorized to update user");
            return Err(DirectoryError::Unauthorized(
                "Unauthorized to update this user".into(),
            ));
        }

        if let Some(role_id) = edits.role_id {
            if !self.reference.role_exists(role_id).await? {
                return Err(DirectoryError::Validation("Role not found".into()));
            }
            if !AccessPolicy::can_assign_role(actor.role_id, role_id) {
                warn!(actor_id = actor.id, role_id, "Actor not authorized to assign role");
                return Err(DirectoryError::Unauthorized(
                    "Unauthorized to assign this role".into(),
                ));
            }
            user.role_id = role_id;
        }

        if let Some(agent_id) = edits.agent_id {
            if !self.reference.agent_exists(agent_id).await? {
                return Err(DirectoryError::Validation("Agent not found".into()));
            }
            user.agent_id = Some(agent_id);
        }

        if let Some(company_id) = edits.company_id.filter(|c| !c.is_empty()) {
            if !self.reference.company_exists(&company_id).await? {
                return Err(DirectoryError::Validation("Company not found".into()));
            }
            user.company_id = Some(company_id);
        }

        if let Some(agent_permission) = edits.agent_permission {
            user.agent_permission = agent_permission;
        }

        if let Some(raw_status) = edits.status {
            user.status = UserStatus::try_from(raw_status)
                .map_err(|_| DirectoryError::Validation("Invalid status".into()))?;
        }

        if let Some(first_name) = edits.first_name.filter(|s| !s.is_empty()) {
            user.first_name = first_name;
        }
        if let Some(last_name) = edits.last_name.filter(|s| !s.is_empty()) {
            user.last_name = last_name;
        }
        if let Some(email) = edits.email.filter(|s| !s.is_empty()) {
            user.email = email;
        }
        if let Some(phone) = edits.phone.filter(|s| !s.is_empty()) {
            user.phone = phone;
        }

        let updated = self.users.update(&user).await?;
        info!(user_id, "User updated");

        // Refresh the snapshot through the same assembly path as
        // `get_detail` so the cache never holds a non-detail shape.
        match self.assemble_detail(&updated).await {
            Ok(view) => {
                if let Err(e) = self.cache.put(user_id, &view, DETAIL_CACHE_TTL).await {
                    warn!(user_id, error = %e, "Failed to refresh cached user detail");
                }
            }
            Err(e) => warn!(user_id, error = %e, "Failed to rebuild user detail for cache"),
        }

        Ok(updated)
    }

    // ── Deletion ────────────────────────────────────────────────

    /// Delete a user on behalf of `actor` and purge its cache entry.
    pub async fn delete(&self, user_id: i32, actor: &User) -> DirectoryResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DirectoryError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        if !AccessPolicy::can_delete(actor, &user) {
            warn!(actor_id = actor.id, user_id, "Actor not authorized to delete user");
            return Err(DirectoryError::Unauthorized(
                "Unauthorized to delete this user".into(),
            ));
        }

        self.users.delete(&user).await?;
        info!(user_id, "User deleted");

        if let Err(e) = self.cache.invalidate(user_id).await {
            warn!(user_id, error = %e, "Failed to invalidate cached user detail");
        }

        Ok(())
    }

    // ── Listing ─────────────────────────────────────────────────

    /// Filtered, paginated listing with per-row capability annotation
    /// computed for `actor`.
    pub async fn list(&self, filter: UserListFilter, actor: &User) -> DirectoryResult<UserListPage> {
        let page_index = (filter.page_index - 1).max(0);
        let page_size = if filter.page_item_count < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            filter.page_item_count
        };

        let query = UserListQuery {
            name: filter.name,
            surname: filter.surname,
            role_id: filter.role_id,
            status: filter.status,
            offset: page_index as u64 * page_size as u64,
            limit: page_size as u64,
        };

        let (users, total) = self.users.list(&query).await?;

        let mut entries = Vec::with_capacity(users.len());
        for user in users {
            let role_title = self
                .reference
                .find_role_by_id(user.role_id)
                .await?
                .map(|r| r.title)
                .unwrap_or_else(|| "Role not found".to_string());

            entries.push(UserListEntry {
                id: user.id,
                username: user.username.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                role_title,
                email: user.email.clone(),
                phone: user.phone.clone(),
                status: user.status,
                can_view: AccessPolicy::can_view(actor, &user),
                can_delete: AccessPolicy::can_delete(actor, &user),
                can_edit: AccessPolicy::can_edit(actor, &user),
                can_approve: AccessPolicy::can_approve(actor, &user),
            });
        }

        info!(total, "Fetched filtered user list");

        Ok(UserListPage {
            user_infos: entries,
            total_item_count: total,
            page_index: page_index + 1,
            page_item_count: page_size,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{Address, Agent, CompanyInformation, Role};
    use crate::infrastructure::cache::InMemoryDetailCache;

    // ── Fakes ───────────────────────────────────────────────────

    #[derive(Default)]
    struct FakeUserStore {
        users: Mutex<HashMap<i32, User>>,
        next_id: AtomicUsize,
        create_calls: AtomicUsize,
    }

    impl FakeUserStore {
        fn with_users(users: Vec<User>) -> Self {
            let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) as usize + 1;
            Self {
                users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
                next_id: AtomicUsize::new(next_id),
                create_calls: AtomicUsize::new(0),
            }
        }

        fn get(&self, id: i32) -> Option<User> {
            self.users.lock().unwrap().get(&id).cloned()
        }
    }

    #[async_trait]
    impl UserStoreInterface for FakeUserStore {
        async fn find_by_id(&self, id: i32) -> DirectoryResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> DirectoryResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn verify_credentials(
            &self,
            username: &str,
            _password: &str,
        ) -> DirectoryResult<Option<User>> {
            self.find_by_username(username).await
        }

        async fn create(&self, mut user: User, _password: &str) -> DirectoryResult<User> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            user.id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32;
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user)
        }

        async fn update(&self, user: &User) -> DirectoryResult<User> {
            let mut users = self.users.lock().unwrap();
            if !users.contains_key(&user.id) {
                return Err(DirectoryError::Store(vec!["User vanished".into()]));
            }
            users.insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, user: &User) -> DirectoryResult<()> {
            self.users.lock().unwrap().remove(&user.id);
            Ok(())
        }

        async fn list(&self, query: &UserListQuery) -> DirectoryResult<(Vec<User>, u64)> {
            let users = self.users.lock().unwrap();
            let mut matches: Vec<User> = users
                .values()
                .filter(|u| {
                    query.name.as_ref().map_or(true, |n| {
                        u.first_name.to_lowercase().contains(&n.to_lowercase())
                    }) && query.surname.as_ref().map_or(true, |s| {
                        u.last_name.to_lowercase().contains(&s.to_lowercase())
                    }) && query.role_id.map_or(true, |r| u.role_id == r)
                        && query.status.map_or(true, |s| u.status.as_i16() == s)
                })
                .cloned()
                .collect();
            matches.sort_by_key(|u| u.id);

            let total = matches.len() as u64;
            let page = matches
                .into_iter()
                .skip(query.offset as usize)
                .take(query.limit as usize)
                .collect();
            Ok((page, total))
        }
    }

    #[derive(Default)]
    struct FakeReferenceStore {
        roles: Vec<Role>,
        agents: Vec<Agent>,
        companies: Vec<CompanyInformation>,
        addresses: Vec<Address>,
    }

    impl FakeReferenceStore {
        fn standard() -> Self {
            Self {
                roles: vec![
                    role(10, "Admin"),
                    role(102, "Manager"),
                    role(1021, "User"),
                ],
                agents: vec![Agent {
                    id: 5,
                    name: "North Agency".into(),
                }],
                companies: vec![CompanyInformation {
                    iata: "ABC".into(),
                    name: Some("Acme Air".into()),
                    country: None,
                    city: None,
                    state: None,
                    zip_code: None,
                    address: None,
                }],
                addresses: vec![Address {
                    id: 40,
                    street: Some("Main St 1".into()),
                    city: Some("Springfield".into()),
                    country: None,
                    zip_code: None,
                }],
            }
        }
    }

    fn role(id: i32, title: &str) -> Role {
        Role {
            id,
            title: title.into(),
            has_agent_permission: false,
        }
    }

    #[async_trait]
    impl ReferenceStoreInterface for FakeReferenceStore {
        async fn role_exists(&self, role_id: i32) -> DirectoryResult<bool> {
            Ok(self.roles.iter().any(|r| r.id == role_id))
        }

        async fn find_role_by_id(&self, role_id: i32) -> DirectoryResult<Option<Role>> {
            Ok(self.roles.iter().find(|r| r.id == role_id).cloned())
        }

        async fn company_exists(&self, iata: &str) -> DirectoryResult<bool> {
            Ok(self.companies.iter().any(|c| c.iata == iata))
        }

        async fn find_company_by_code(
            &self,
            iata: &str,
        ) -> DirectoryResult<Option<CompanyInformation>> {
            Ok(self.companies.iter().find(|c| c.iata == iata).cloned())
        }

        async fn agent_exists(&self, agent_id: i32) -> DirectoryResult<bool> {
            Ok(self.agents.iter().any(|a| a.id == agent_id))
        }

        async fn find_agent_by_id(&self, agent_id: i32) -> DirectoryResult<Option<Agent>> {
            Ok(self.agents.iter().find(|a| a.id == agent_id).cloned())
        }

        async fn find_address_by_id(&self, address_id: i32) -> DirectoryResult<Option<Address>> {
            Ok(self.addresses.iter().find(|a| a.id == address_id).cloned())
        }
    }

    /// Cache stub whose every operation fails, as when Redis is down.
    struct DownCache;

    #[async_trait]
    impl DetailCacheInterface for DownCache {
        async fn get(&self, _user_id: i32) -> DirectoryResult<Option<UserDetailView>> {
            Err(DirectoryError::CacheUnavailable("connection refused".into()))
        }

        async fn put(
            &self,
            _user_id: i32,
            _view: &UserDetailView,
            _ttl: Duration,
        ) -> DirectoryResult<()> {
            Err(DirectoryError::CacheUnavailable("connection refused".into()))
        }

        async fn invalidate(&self, _user_id: i32) -> DirectoryResult<()> {
            Err(DirectoryError::CacheUnavailable("connection refused".into()))
        }
    }

    // ── Fixtures ────────────────────────────────────────────────

    fn user(id: i32, role_id: i32, agent_id: Option<i32>, status: UserStatus) -> User {
        User {
            id,
            username: format!("user{id}"),
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            email: format!("user{id}@example.com"),
            phone: format!("+1000000{id:03}"),
            role_id,
            address_id: None,
            agent_id,
            company_id: None,
            agent_permission: false,
            status,
        }
    }

    fn admin() -> User {
        user(1, 10, Some(5), UserStatus::Active)
    }

    fn directory(
        store: FakeUserStore,
    ) -> (
        UserDirectory<FakeUserStore, FakeReferenceStore, InMemoryDetailCache>,
        Arc<FakeUserStore>,
        Arc<InMemoryDetailCache>,
    ) {
        let store = Arc::new(store);
        let cache = Arc::new(InMemoryDetailCache::new());
        let dir = UserDirectory::new(
            store.clone(),
            Arc::new(FakeReferenceStore::standard()),
            cache.clone(),
        );
        (dir, store, cache)
    }

    fn registration() -> RegisterUserDto {
        RegisterUserDto {
            username: "newuser".into(),
            first_name: "New".into(),
            last_name: "User".into(),
            email: "new@example.com".into(),
            phone: "+1999".into(),
            role_id: 1021,
            agent_id: Some(5),
            company_id: Some("ABC".into()),
            agent_permission: false,
            password: "hunter2-hunter2".into(),
        }
    }

    // ── get_detail ──────────────────────────────────────────────

    #[tokio::test]
    async fn detail_miss_builds_joins_and_populates_cache() {
        let mut target = user(2, 1021, Some(5), UserStatus::Active);
        target.address_id = Some(40);
        target.company_id = Some("ABC".into());
        let (dir, _store, cache) = directory(FakeUserStore::with_users(vec![target]));

        let view = dir.get_detail(2).await.unwrap();
        assert_eq!(view.role_title, "User");
        assert_eq!(view.agent.as_ref().unwrap().name, "North Agency");
        assert_eq!(view.company_info.as_ref().unwrap().iata, "ABC");
        assert_eq!(view.address.as_ref().unwrap().id, 40);

        assert_eq!(cache.get(2).await.unwrap(), Some(view));
    }

    #[tokio::test]
    async fn detail_hit_skips_the_backing_store() {
        let (dir, store, _cache) = directory(FakeUserStore::with_users(vec![user(
            2,
            1021,
            Some(5),
            UserStatus::Active,
        )]));

        let first = dir.get_detail(2).await.unwrap();

        // Mutate the store behind the cache's back; a hit must still
        // serve the snapshot.
        store.users.lock().unwrap().get_mut(&2).unwrap().first_name = "Changed".into();
        let second = dir.get_detail(2).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn detail_unknown_role_falls_back_to_empty_title() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![user(
            2,
            999999,
            Some(5),
            UserStatus::Active,
        )]));
        let view = dir.get_detail(2).await.unwrap();
        assert_eq!(view.role_title, "");
    }

    #[tokio::test]
    async fn detail_for_missing_user_is_not_found() {
        let (dir, _store, _cache) = directory(FakeUserStore::default());
        let err = dir.get_detail(42).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn detail_aborts_when_cache_is_down() {
        let store = Arc::new(FakeUserStore::with_users(vec![user(
            2,
            1021,
            Some(5),
            UserStatus::Active,
        )]));
        let dir = UserDirectory::new(
            store,
            Arc::new(FakeReferenceStore::standard()),
            Arc::new(DownCache),
        );
        let err = dir.get_detail(2).await.unwrap_err();
        assert!(matches!(err, DirectoryError::CacheUnavailable(_)));
        assert!(err.is_retryable());
    }

    // ── create ──────────────────────────────────────────────────

    #[tokio::test]
    async fn create_forces_pending_status_and_assigns_id() {
        let (dir, store, _cache) = directory(FakeUserStore::with_users(vec![admin()]));
        let created = dir.create(registration(), &admin()).await.unwrap();
        assert_eq!(created.status, UserStatus::Pending);
        assert!(created.id > 0);
        assert_eq!(store.get(created.id).unwrap().username, "newuser");
    }

    #[tokio::test]
    async fn create_rejects_unknown_role() {
        let (dir, store, _cache) = directory(FakeUserStore::with_users(vec![admin()]));
        let mut reg = registration();
        reg.role_id = 777;
        let err = dir.create(reg, &admin()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_rejects_role_at_or_above_actor() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![admin()]));
        let mut reg = registration();
        reg.role_id = 10; // same as actor
        let err = dir.create(reg, &admin()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn create_with_unknown_company_never_reaches_the_store() {
        let (dir, store, _cache) = directory(FakeUserStore::with_users(vec![admin()]));
        let mut reg = registration();
        reg.company_id = Some("ZZZ".into());
        let err = dir.create(reg, &admin()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_requires_an_agent() {
        let (dir, store, _cache) = directory(FakeUserStore::with_users(vec![admin()]));
        let mut reg = registration();
        reg.agent_id = None;
        let err = dir.create(reg, &admin()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    // ── update ──────────────────────────────────────────────────

    #[tokio::test]
    async fn update_applies_only_present_non_empty_fields() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![
            admin(),
            user(2, 1021, Some(5), UserStatus::Active),
        ]));

        let edits = EditUserDto {
            first_name: Some("Renamed".into()),
            last_name: Some(String::new()), // empty: left untouched
            phone: Some("+2000".into()),
            ..Default::default()
        };
        let updated = dir.update(2, edits, &admin()).await.unwrap();
        assert_eq!(updated.first_name, "Renamed");
        assert_eq!(updated.last_name, "Last2");
        assert_eq!(updated.phone, "+2000");
        assert_eq!(updated.email, "user2@example.com");
    }

    #[tokio::test]
    async fn update_rejects_invalid_status() {
        let (dir, store, _cache) = directory(FakeUserStore::with_users(vec![
            admin(),
            user(2, 1021, Some(5), UserStatus::Active),
        ]));
        let edits = EditUserDto {
            status: Some(7),
            ..Default::default()
        };
        let err = dir.update(2, edits, &admin()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
        assert_eq!(store.get(2).unwrap().status, UserStatus::Active);
    }

    #[tokio::test]
    async fn update_accepts_each_valid_status() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![
            admin(),
            user(2, 1021, Some(5), UserStatus::Active),
        ]));
        for raw in 0..=2i16 {
            let edits = EditUserDto {
                status: Some(raw),
                ..Default::default()
            };
            let updated = dir.update(2, edits, &admin()).await.unwrap();
            assert_eq!(updated.status.as_i16(), raw);
        }
    }

    #[tokio::test]
    async fn update_role_change_rechecks_assignment_seniority() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![
            user(3, 102, Some(5), UserStatus::Active), // manager actor
            user(2, 1021, Some(5), UserStatus::Active),
        ]));
        let actor = user(3, 102, Some(5), UserStatus::Active);

        // Manager cannot promote to Admin (10), which outranks them.
        let edits = EditUserDto {
            role_id: Some(10),
            ..Default::default()
        };
        let err = dir.update(2, edits, &actor).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unauthorized(_)));

        let edits = EditUserDto {
            role_id: Some(1021),
            ..Default::default()
        };
        assert!(dir.update(2, edits, &actor).await.is_ok());
    }

    #[tokio::test]
    async fn update_by_unauthorized_actor_is_denied() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![
            user(3, 10, Some(1), UserStatus::Active), // different affiliation
            user(2, 1021, Some(2), UserStatus::Active),
        ]));
        let actor = user(3, 10, Some(1), UserStatus::Active);
        let err = dir.update(2, EditUserDto::default(), &actor).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn update_refreshes_cache_with_canonical_detail_shape() {
        let (dir, _store, cache) = directory(FakeUserStore::with_users(vec![
            admin(),
            user(2, 1021, Some(5), UserStatus::Active),
        ]));

        dir.get_detail(2).await.unwrap();

        let edits = EditUserDto {
            first_name: Some("Fresh".into()),
            ..Default::default()
        };
        dir.update(2, edits, &admin()).await.unwrap();

        let cached = cache.get(2).await.unwrap().unwrap();
        assert_eq!(cached.first_name, "Fresh");
        assert_eq!(cached.role_title, "User");
    }

    #[tokio::test]
    async fn update_succeeds_even_when_cache_is_down_for_writes() {
        // Cache that reads fine but fails writes would be contrived; a
        // fully down cache only affects the read path, so drive update
        // directly.
        let store = Arc::new(FakeUserStore::with_users(vec![
            admin(),
            user(2, 1021, Some(5), UserStatus::Active),
        ]));
        let dir = UserDirectory::new(
            store.clone(),
            Arc::new(FakeReferenceStore::standard()),
            Arc::new(DownCache),
        );
        let edits = EditUserDto {
            first_name: Some("Survivor".into()),
            ..Default::default()
        };
        let updated = dir.update(2, edits, &admin()).await.unwrap();
        assert_eq!(updated.first_name, "Survivor");
        assert_eq!(store.get(2).unwrap().first_name, "Survivor");
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![admin()]));
        let err = dir
            .update(42, EditUserDto::default(), &admin())
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }

    // ── delete ──────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_purges_store_and_cache() {
        let (dir, store, cache) = directory(FakeUserStore::with_users(vec![
            admin(),
            user(2, 1021, Some(5), UserStatus::Active),
        ]));
        dir.get_detail(2).await.unwrap();

        dir.delete(2, &admin()).await.unwrap();
        assert!(store.get(2).is_none());
        assert_eq!(cache.get(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_by_unauthorized_actor_is_denied() {
        let (dir, store, _cache) = directory(FakeUserStore::with_users(vec![
            user(3, 1021, Some(5), UserStatus::Active),
            user(2, 102, Some(5), UserStatus::Active),
        ]));
        let actor = user(3, 1021, Some(5), UserStatus::Active);
        let err = dir.delete(2, &actor).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unauthorized(_)));
        assert!(store.get(2).is_some());
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![admin()]));
        let err = dir.delete(42, &admin()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }

    // ── list ────────────────────────────────────────────────────

    fn twenty_users() -> Vec<User> {
        (1..=20)
            .map(|id| user(id, 1021, Some(5), UserStatus::Active))
            .collect()
    }

    #[tokio::test]
    async fn list_defaults_to_fifteen_items_on_first_page() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(twenty_users()));
        let filter = UserListFilter {
            page_index: 1,
            page_item_count: 0,
            ..Default::default()
        };
        let page = dir.list(filter, &admin()).await.unwrap();

        assert_eq!(page.user_infos.len(), 15);
        assert_eq!(page.page_index, 1);
        assert_eq!(page.page_item_count, 15);
        assert_eq!(page.total_item_count, 20);
    }

    #[tokio::test]
    async fn list_second_page_holds_the_remainder() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(twenty_users()));
        let filter = UserListFilter {
            page_index: 2,
            page_item_count: 0,
            ..Default::default()
        };
        let page = dir.list(filter, &admin()).await.unwrap();
        assert_eq!(page.user_infos.len(), 5);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.total_item_count, 20);
    }

    #[tokio::test]
    async fn list_clamps_page_index_below_one() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(twenty_users()));
        let filter = UserListFilter {
            page_index: -3,
            page_item_count: 5,
            ..Default::default()
        };
        let page = dir.list(filter, &admin()).await.unwrap();
        assert_eq!(page.page_index, 1);
        assert_eq!(page.user_infos[0].id, 1);
        assert_eq!(page.user_infos.len(), 5);
    }

    #[tokio::test]
    async fn list_name_filter_is_case_insensitive() {
        let mut users = twenty_users();
        users[4].first_name = "Margarete".into();
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(users));

        let filter = UserListFilter {
            name: Some("mArGa".into()),
            ..Default::default()
        };
        let page = dir.list(filter, &admin()).await.unwrap();
        assert_eq!(page.total_item_count, 1);
        assert_eq!(page.user_infos[0].first_name, "Margarete");
    }

    #[tokio::test]
    async fn list_filters_combine() {
        let mut users = twenty_users();
        users[0].role_id = 102;
        users[1].role_id = 102;
        users[1].status = UserStatus::Suspended;
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(users));

        let filter = UserListFilter {
            role_id: Some(102),
            status: Some(1),
            ..Default::default()
        };
        let page = dir.list(filter, &admin()).await.unwrap();
        assert_eq!(page.total_item_count, 1);
        assert_eq!(page.user_infos[0].id, 2);
    }

    #[tokio::test]
    async fn list_annotates_rows_with_viewer_capabilities() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![
            admin(),
            user(2, 1021, Some(5), UserStatus::Active), // same affiliation, junior
            user(3, 1021, Some(9), UserStatus::Active), // different affiliation
        ]));
        let page = dir.list(UserListFilter::default(), &admin()).await.unwrap();

        let by_id = |id: i32| page.user_infos.iter().find(|e| e.id == id).unwrap();
        // Self-access.
        assert!(by_id(1).can_edit && by_id(1).can_view);
        // Junior under the same agent.
        assert!(by_id(2).can_edit && by_id(2).can_delete && by_id(2).can_approve);
        // Cross-affiliation target.
        let foreign = by_id(3);
        assert!(
            !foreign.can_view && !foreign.can_edit && !foreign.can_delete && !foreign.can_approve
        );
    }

    #[tokio::test]
    async fn list_unknown_role_title_falls_back() {
        let (dir, _store, _cache) = directory(FakeUserStore::with_users(vec![user(
            2,
            999999,
            Some(5),
            UserStatus::Active,
        )]));
        let page = dir.list(UserListFilter::default(), &admin()).await.unwrap();
        assert_eq!(page.user_infos[0].role_title, "Role not found");
    }
}
