//! Database migrations

use sea_orm_migration::prelude::*;

mod m20250110_000001_create_roles;
mod m20250110_000002_create_agents;
mod m20250110_000003_create_company_informations;
mod m20250110_000004_create_addresses;
mod m20250110_000005_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_roles::Migration),
            Box::new(m20250110_000002_create_agents::Migration),
            Box::new(m20250110_000003_create_company_informations::Migration),
            Box::new(m20250110_000004_create_addresses::Migration),
            Box::new(m20250110_000005_create_users::Migration),
        ]
    }
}
