/// Partial-update payload for `UserDirectory::update`.
///
/// Absent fields leave the stored value untouched; string fields that
/// are present but empty are treated as absent. `status` is a raw value
/// validated against {0, 1, 2} when present.
#[derive(Debug, Clone, Default)]
pub struct EditUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<i16>,
    pub role_id: Option<i32>,
    pub agent_id: Option<i32>,
    pub company_id: Option<String>,
    pub agent_permission: Option<bool>,
}
