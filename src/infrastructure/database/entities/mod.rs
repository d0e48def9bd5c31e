//! SeaORM entities for the directory schema.

pub mod address;
pub mod agent;
pub mod company_information;
pub mod role;
pub mod user;
