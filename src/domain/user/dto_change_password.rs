#[derive(Debug, Clone)]
pub struct UserChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}
