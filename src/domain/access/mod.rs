//! Authorization: role seniority and record-level access rules.

pub mod hierarchy;
pub mod policy;

pub use hierarchy::RoleHierarchy;
pub use policy::AccessPolicy;
