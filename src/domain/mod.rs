//! Core business types, traits and errors. No I/O lives here.

pub mod access;
pub mod error;
pub mod reference;
pub mod user;

pub use error::{DirectoryError, DirectoryResult};

pub use access::{AccessPolicy, RoleHierarchy};
pub use reference::{Address, Agent, CompanyInformation, ReferenceStoreInterface, Role};
pub use user::{
    detail_cache_key, DetailCacheInterface, EditUserDto, RegisterUserDto, User, UserDetailView,
    UserListEntry, UserListFilter, UserListPage, UserListQuery, UserStatus, UserStoreInterface,
    DETAIL_CACHE_TTL,
};
