/// Registration payload for `UserDirectory::create`. The password is
/// passed through to the identity store and never persisted here.
#[derive(Debug, Clone)]
pub struct RegisterUserDto {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role_id: i32,
    pub agent_id: Option<i32>,
    pub company_id: Option<String>,
    pub agent_permission: bool,
    pub password: String,
}
