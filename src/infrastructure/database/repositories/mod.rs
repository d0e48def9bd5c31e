//! Concrete store implementations over SeaORM.

pub mod reference_repository;
pub mod user_repository;

pub use reference_repository::SeaOrmReferenceStore;
pub use user_repository::SeaOrmUserStore;
