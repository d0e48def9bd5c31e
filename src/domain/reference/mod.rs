//! Reference entities joined into user views: roles, agents, companies,
//! addresses. All read-only from the directory's perspective.

pub mod model;
pub mod repository;

pub use model::{Address, Agent, CompanyInformation, Role};
pub use repository::ReferenceStoreInterface;
