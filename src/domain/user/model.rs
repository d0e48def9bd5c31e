use serde::{Deserialize, Serialize};

use crate::domain::{DirectoryError, DirectoryResult};

/// User account status. Exact semantics are owned by callers; the
/// directory only enforces that stored values stay within {0, 1, 2}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum UserStatus {
    Active,
    Suspended,
    Pending,
}

impl UserStatus {
    pub fn as_i16(self) -> i16 {
        match self {
            UserStatus::Active => 0,
            UserStatus::Suspended => 1,
            UserStatus::Pending => 2,
        }
    }
}

impl TryFrom<i16> for UserStatus {
    type Error = DirectoryError;

    fn try_from(value: i16) -> DirectoryResult<Self> {
        match value {
            0 => Ok(UserStatus::Active),
            1 => Ok(UserStatus::Suspended),
            2 => Ok(UserStatus::Pending),
            other => Err(DirectoryError::Validation(format!(
                "Invalid status: {other}"
            ))),
        }
    }
}

impl From<UserStatus> for i16 {
    fn from(status: UserStatus) -> Self {
        status.as_i16()
    }
}

/// User record as seen by the directory. Credentials never appear here;
/// they live behind the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role_id: i32,
    pub address_id: Option<i32>,
    pub agent_id: Option<i32>,
    pub company_id: Option<String>,
    pub agent_permission: bool,
    pub status: UserStatus,
}
