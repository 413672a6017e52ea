use super::UserRole;

/// Insert payload; the password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub customer_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub password_hash: String,
    pub is_superuser: bool,
}
