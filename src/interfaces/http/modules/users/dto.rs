//! User directory DTOs
//!
//! Wire representations for the user endpoints. Statuses travel as raw
//! numeric codes (0 active, 1 suspended, 2 pending).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    Address, Agent, CompanyInformation, EditUserDto, RegisterUserDto, User, UserDetailView,
    UserListEntry, UserListFilter, UserListPage,
};

/// User API representation (no reference joins)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub agent_permission: bool,
    pub status: i16,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            phone: u.phone,
            role_id: u.role_id,
            agent_id: u.agent_id,
            company_id: u.company_id,
            agent_permission: u.agent_permission,
            status: u.status.as_i16(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyInfoDto {
    pub iata: String,
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub address: Option<String>,
}

impl From<CompanyInformation> for CompanyInfoDto {
    fn from(c: CompanyInformation) -> Self {
        Self {
            iata: c.iata,
            name: c.name,
            country: c.country,
            city: c.city,
            state: c.state,
            zip_code: c.zip_code,
            address: c.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressDto {
    pub id: i32,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            street: a.street,
            city: a.city,
            country: a.country,
            zip_code: a.zip_code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentDto {
    pub id: i32,
    pub name: String,
}

impl From<Agent> for AgentDto {
    fn from(a: Agent) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

/// Denormalized single-user projection with its reference joins
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailDto {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role_title: String,
    pub role_id: i32,
    pub email: String,
    pub phone: String,
    pub status: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfoDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentDto>,
}

impl From<UserDetailView> for UserDetailDto {
    fn from(v: UserDetailView) -> Self {
        Self {
            id: v.id,
            username: v.username,
            first_name: v.first_name,
            last_name: v.last_name,
            role_title: v.role_title,
            role_id: v.role_id,
            email: v.email,
            phone: v.phone,
            status: v.status.as_i16(),
            company_info: v.company_info.map(CompanyInfoDto::from),
            address: v.address.map(AddressDto::from),
            agent: v.agent.map(AgentDto::from),
        }
    }
}

/// One listing row with the viewer's capability flags
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListItemDto {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role_title: String,
    pub email: String,
    pub phone: String,
    pub status: i16,
    pub can_view: bool,
    pub can_delete: bool,
    pub can_edit: bool,
    pub can_approve: bool,
}

impl From<UserListEntry> for UserListItemDto {
    fn from(e: UserListEntry) -> Self {
        Self {
            id: e.id,
            username: e.username,
            first_name: e.first_name,
            last_name: e.last_name,
            role_title: e.role_title,
            email: e.email,
            phone: e.phone,
            status: e.status.as_i16(),
            can_view: e.can_view,
            can_delete: e.can_delete,
            can_edit: e.can_edit,
            can_approve: e.can_approve,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListDto {
    pub user_infos: Vec<UserListItemDto>,
    pub total_item_count: u64,
    pub page_index: i32,
    pub page_item_count: i32,
}

impl From<UserListPage> for UserListDto {
    fn from(p: UserListPage) -> Self {
        Self {
            user_infos: p.user_infos.into_iter().map(UserListItemDto::from).collect(),
            total_item_count: p.total_item_count,
            page_index: p.page_index,
            page_item_count: p.page_item_count,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3–50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "phone is required"))]
    pub phone: String,
    pub role_id: i32,
    pub agent_id: Option<i32>,
    pub company_id: Option<String>,
    #[serde(default)]
    pub agent_permission: bool,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
}

impl From<RegisterUserRequest> for RegisterUserDto {
    fn from(r: RegisterUserRequest) -> Self {
        Self {
            username: r.username,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            role_id: r.role_id,
            agent_id: r.agent_id,
            company_id: r.company_id,
            agent_permission: r.agent_permission,
            password: r.password,
        }
    }
}

/// Partial update request. Absent fields are left untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Raw status code: 0 active, 1 suspended, 2 pending
    pub status: Option<i16>,
    pub role_id: Option<i32>,
    pub agent_id: Option<i32>,
    pub company_id: Option<String>,
    pub agent_permission: Option<bool>,
}

impl From<UpdateUserRequest> for EditUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            status: r.status,
            role_id: r.role_id,
            agent_id: r.agent_id,
            company_id: r.company_id,
            agent_permission: r.agent_permission,
        }
    }
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Filter by first name (case-insensitive substring)
    pub name: Option<String>,
    /// Filter by last name (case-insensitive substring)
    pub surname: Option<String>,
    /// Filter by role id
    pub role_id: Option<i32>,
    /// Filter by raw status code
    pub status: Option<i16>,
    /// 1-based page index
    #[serde(default = "default_page_index")]
    pub page_index: i32,
    /// Page size; 0 or less selects the default
    #[serde(default)]
    pub page_item_count: i32,
}

fn default_page_index() -> i32 {
    1
}

impl From<ListUsersParams> for UserListFilter {
    fn from(p: ListUsersParams) -> Self {
        Self {
            name: p.name,
            surname: p.surname,
            role_id: p.role_id,
            status: p.status,
            page_index: p.page_index,
            page_item_count: p.page_item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserStatus;

    // The update endpoint returns the bare user record, not the joined
    // detail projection, so its success arm must go through `UserDto`.
    #[test]
    fn updated_user_record_maps_to_user_dto() {
        let updated = User {
            id: 7,
            username: "jdoe".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone: "+1000".into(),
            role_id: 1021,
            address_id: Some(40),
            agent_id: Some(5),
            company_id: Some("ABC".into()),
            agent_permission: true,
            status: UserStatus::Pending,
        };

        let dto = UserDto::from(updated);
        assert_eq!(dto.id, 7);
        assert_eq!(dto.role_id, 1021);
        assert_eq!(dto.agent_id, Some(5));
        assert_eq!(dto.company_id.as_deref(), Some("ABC"));
        assert_eq!(dto.status, 2);
    }

    #[test]
    fn detail_view_maps_to_detail_dto_with_joins() {
        let view = UserDetailView {
            id: 7,
            username: "jdoe".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            role_title: "User".into(),
            role_id: 1021,
            email: "jane@example.com".into(),
            phone: "+1000".into(),
            status: UserStatus::Active,
            company_info: None,
            address: None,
            agent: Some(Agent {
                id: 5,
                name: "North Agency".into(),
            }),
        };

        let dto = UserDetailDto::from(view);
        assert_eq!(dto.role_title, "User");
        assert_eq!(dto.status, 0);
        assert!(dto.company_info.is_none());
        assert_eq!(dto.agent.map(|a| a.id), Some(5));
    }
}
