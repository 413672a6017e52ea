use super::UserRole;

#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}
