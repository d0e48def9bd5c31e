use serde::{Deserialize, Serialize};

use crate::domain::user::UserStatus;

/// Caller-facing listing filter. `page_index` is 1-based; values below 1
/// are clamped. A `page_item_count` of 0 or less selects the default
/// page size. `status` is matched as a raw value: an out-of-range status
/// filter simply matches nothing.
#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub role_id: Option<i32>,
    pub status: Option<i16>,
    pub page_index: i32,
    pub page_item_count: i32,
}

/// Normalized, store-facing form of a listing filter.
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub role_id: Option<i32>,
    pub status: Option<i16>,
    pub offset: u64,
    pub limit: u64,
}

/// One listing row: user projection plus the capability flags computed
/// for the requesting viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListEntry {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role_title: String,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub can_view: bool,
    pub can_delete: bool,
    pub can_edit: bool,
    pub can_approve: bool,
}

/// Listing result page. `page_index` is the normalized 1-based index and
/// `page_item_count` the page size actually used, which may differ from
/// what the caller asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListPage {
    pub user_infos: Vec<UserListEntry>,
    pub total_item_count: u64,
    pub page_index: i32,
    pub page_item_count: i32,
}
