//! User aggregate
//!
//! Contains the User record, cached detail projection, listing types,
//! DTOs, and the identity-store / detail-cache interfaces.

pub mod cache;
pub mod detail;
pub mod list;
pub mod model;
pub mod repository;

mod dto_edit;
mod dto_register;

pub use model::{User, UserStatus};

pub use detail::UserDetailView;
pub use list::{UserListEntry, UserListFilter, UserListPage, UserListQuery};

pub use dto_edit::EditUserDto;
pub use dto_register::RegisterUserDto;

pub use cache::{detail_cache_key, DetailCacheInterface, DETAIL_CACHE_TTL};
pub use repository::UserStoreInterface;
