use async_trait::async_trait;

use super::{CreateUserDto, GetUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is taken.
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn find_by_id(&self, user_id: i32) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn list(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>>;
    async fn count(&self) -> DomainResult<u64>;

    async fn update(&self, user_id: i32, dto: UpdateUserDto) -> DomainResult<User>;
    async fn update_password(&self, user_id: i32, password_hash: &str) -> DomainResult<()>;
    async fn touch_last_login(&self, user_id: i32) -> DomainResult<()>;
    async fn delete(&self, user_id: i32) -> DomainResult<()>;
}
