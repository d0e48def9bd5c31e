use async_trait::async_trait;

use super::{Address, Agent, CompanyInformation, Role};
use crate::domain::DirectoryResult;

/// Read-only store for roles and affiliation reference data.
#[async_trait]
pub trait ReferenceStoreInterface: Send + Sync {
    async fn role_exists(&self, role_id: i32) -> DirectoryResult<bool>;
    async fn find_role_by_id(&self, role_id: i32) -> DirectoryResult<Option<Role>>;

    async fn company_exists(&self, iata: &str) -> DirectoryResult<bool>;
    async fn find_company_by_code(&self, iata: &str) -> DirectoryResult<Option<CompanyInformation>>;

    async fn agent_exists(&self, agent_id: i32) -> DirectoryResult<bool>;
    async fn find_agent_by_id(&self, agent_id: i32) -> DirectoryResult<Option<Agent>>;

    async fn find_address_by_id(&self, address_id: i32) -> DirectoryResult<Option<Address>>;
}
