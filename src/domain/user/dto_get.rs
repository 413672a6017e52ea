use super::UserRole;
use crate::shared::PaginationParams;

#[derive(Debug, Clone, Default)]
pub struct GetUserDto {
    pub customer_id: Option<String>,
    /// Matches email, first or last name
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub pagination: PaginationParams,
    pub sort_by: Option<String>,
}
