use serde::{Deserialize, Serialize};

use crate::domain::reference::{Address, Agent, CompanyInformation};
use crate::domain::user::UserStatus;

/// Denormalized single-user projection: the user record joined with its
/// role title and optional address/agent/company reference rows.
///
/// This is the cached artifact — a point-in-time snapshot that must be
/// refreshed on every mutation of the underlying user, not merely left
/// to expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetailView {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role_title: String,
    pub role_id: i32,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub company_info: Option<CompanyInformation>,
    pub address: Option<Address>,
    pub agent: Option<Agent>,
}
