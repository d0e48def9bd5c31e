//! SeaORM-backed reference store for roles and affiliation data.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::domain::{
    Address, Agent, CompanyInformation, DirectoryError, DirectoryResult, ReferenceStoreInterface,
    Role,
};
use crate::infrastructure::database::entities::{address, agent, company_information, role};

pub struct SeaOrmReferenceStore {
    db: DatabaseConnection,
}

impl SeaOrmReferenceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_err(e: sea_orm::DbErr) -> DirectoryError {
    DirectoryError::Store(vec![format!("Database error: {e}")])
}

#[async_trait]
impl ReferenceStoreInterface for SeaOrmReferenceStore {
    async fn role_exists(&self, role_id: i32) -> DirectoryResult<bool> {
        let count = role::Entity::find()
            .filter(role::Column::Id.eq(role_id))
            .count(&self.db)
            .await
            .map_err(store_err)?;
        Ok(count > 0)
    }

    async fn find_role_by_id(&self, role_id: i32) -> DirectoryResult<Option<Role>> {
        let model = role::Entity::find_by_id(role_id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(|m| Role {
            id: m.id,
            title: m.title,
            has_agent_permission: m.has_agent_permission,
        }))
    }

    async fn company_exists(&self, iata: &str) -> DirectoryResult<bool> {
        let count = company_information::Entity::find()
            .filter(company_information::Column::Iata.eq(iata))
            .count(&self.db)
            .await
            .map_err(store_err)?;
        Ok(count > 0)
    }

    async fn find_company_by_code(
        &self,
        iata: &str,
    ) -> DirectoryResult<Option<CompanyInformation>> {
        let model = company_information::Entity::find_by_id(iata)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(|m| CompanyInformation {
            iata: m.iata,
            name: m.name,
            country: m.country,
            city: m.city,
            state: m.state,
            zip_code: m.zip_code,
            address: m.address,
        }))
    }

    async fn agent_exists(&self, agent_id: i32) -> DirectoryResult<bool> {
        let count = agent::Entity::find()
            .filter(agent::Column::Id.eq(agent_id))
            .count(&self.db)
            .await
            .map_err(store_err)?;
        Ok(count > 0)
    }

    async fn find_agent_by_id(&self, agent_id: i32) -> DirectoryResult<Option<Agent>> {
        let model = agent::Entity::find_by_id(agent_id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(|m| Agent {
            id: m.id,
            name: m.name,
        }))
    }

    async fn find_address_by_id(&self, address_id: i32) -> DirectoryResult<Option<Address>> {
        let model = address::Entity::find_by_id(address_id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(|m| Address {
            id: m.id,
            street: m.street,
            city: m.city,
            country: m.country,
            zip_code: m.zip_code,
        }))
    }
}
