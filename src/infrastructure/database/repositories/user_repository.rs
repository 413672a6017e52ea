use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::{conflict_or_db_err, db_err};
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GetUserDto, UpdateUserDto, User, UserRepository,
    UserRole,
};
use crate::infrastructure::database::entities::user;
use crate::shared::PaginatedResult;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, user_id: i32) -> DomainResult<user::Model> {
        user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "user_id", user_id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Manager => UserRole::Manager,
        user::UserRole::Cashier => UserRole::Cashier,
        user::UserRole::Viewer => UserRole::Viewer,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Manager => user::UserRole::Manager,
        UserRole::Cashier => user::UserRole::Cashier,
        UserRole::Viewer => user::UserRole::Viewer,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        user_id: model.user_id,
        customer_id: model.customer_id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        phone_number: model.phone_number,
        role: entity_role_to_domain(model.role),
        password_hash: model.password_hash,
        is_superuser: model.is_superuser,
        is_active: model.is_active,
        date_joined: model.date_joined,
        last_login_at: model.last_login_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let email = dto.email.trim().to_lowercase();
        let new_user = user::ActiveModel {
            user_id: NotSet,
            customer_id: Set(dto.customer_id),
            email: Set(email.clone()),
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            phone_number: Set(dto.phone_number),
            role: Set(domain_role_to_entity(dto.role)),
            password_hash: Set(dto.password_hash),
            is_superuser: Set(dto.is_superuser),
            is_active: Set(true),
            date_joined: Set(Utc::now()),
            last_login_at: Set(None),
        };

        let model = new_user
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db_err(e, || format!("Email {} already exists", email)))?;
        info!("User created: {} ({})", model.email, model.user_id);
        Ok(user_model_to_domain(model))
    }

    async fn find_by_id(&self, user_id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn list(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        let page = dto.pagination;
        let mut query = user::Entity::find();

        if let Some(ref customer_id) = dto.customer_id {
            query = query.filter(user::Column::CustomerId.eq(customer_id.as_str()));
        }

        // Search on email or name
        if let Some(ref search) = dto.search {
            query = query.filter(
                Condition::any()
                    .add(user::Column::Email.contains(search))
                    .add(user::Column::FirstName.contains(search))
                    .add(user::Column::LastName.contains(search)),
            );
        }

        if let Some(role) = dto.role {
            query = query.filter(user::Column::Role.eq(domain_role_to_entity(role)));
        }

        query = match dto.sort_by.as_deref() {
            Some("email") => query.order_by_asc(user::Column::Email),
            Some("name") => query
                .order_by_asc(user::Column::LastName)
                .order_by_asc(user::Column::FirstName),
            Some("role") => query.order_by_asc(user::Column::Role),
            _ => query.order_by_desc(user::Column::DateJoined),
        };

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(user_model_to_domain).collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update(&self, user_id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        let existing = self.find_model(user_id).await?;
        let mut active: user::ActiveModel = existing.clone().into();

        if let Some(first_name) = dto.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = dto.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(phone) = dto.phone_number {
            active.phone_number = Set(Some(phone));
        }
        if let Some(role) = dto.role {
            active.role = Set(domain_role_to_entity(role));
        }
        if let Some(is_active) = dto.is_active {
            active.is_active = Set(is_active);
        }

        if !active.is_changed() {
            return Ok(user_model_to_domain(existing));
        }
        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(user_model_to_domain(updated))
    }

    async fn update_password(&self, user_id: i32, password_hash: &str) -> DomainResult<()> {
        let existing = self.find_model(user_id).await?;
        let mut active: user::ActiveModel = existing.into();
        active.password_hash = Set(password_hash.to_string());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn touch_last_login(&self, user_id: i32) -> DomainResult<()> {
        let existing = self.find_model(user_id).await?;
        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, user_id: i32) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "user_id", user_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::seed_customer;
    use crate::infrastructure::database::test_database;
    use crate::shared::PaginationParams;

    fn dto(email: &str, role: UserRole) -> CreateUserDto {
        CreateUserDto {
            customer_id: Some("EPMS-0001".into()),
            email: email.into(),
            first_name: "Wanjiru".into(),
            last_name: "Kamau".into(),
            phone_number: None,
            role,
            password_hash: "hash".into(),
            is_superuser: false,
        }
    }

    async fn repo() -> SeaOrmUserRepository {
        let db = test_database().await;
        seed_customer(&db, "EPMS-0001").await;
        SeaOrmUserRepository::new(db)
    }

    #[tokio::test]
    async fn create_lowercases_email() {
        let repo = repo().await;
        let user = repo.create(dto("Cashier@Lot.Test", UserRole::Cashier)).await.unwrap();
        assert_eq!(user.email, "cashier@lot.test");
        assert!(user.is_active);
        assert!(repo.find_by_email("CASHIER@lot.test").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repo = repo().await;
        repo.create(dto("a@lot.test", UserRole::Admin)).await.unwrap();
        let err = repo.create(dto("A@lot.test", UserRole::Viewer)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_filters_by_role() {
        let repo = repo().await;
        repo.create(dto("a@lot.test", UserRole::Admin)).await.unwrap();
        repo.create(dto("b@lot.test", UserRole::Cashier)).await.unwrap();
        repo.create(dto("c@lot.test", UserRole::Cashier)).await.unwrap();

        let page = repo
            .list(GetUserDto {
                customer_id: Some("EPMS-0001".into()),
                role: Some(UserRole::Cashier),
                pagination: PaginationParams::new(Some(1), Some(10)),
                sort_by: Some("email".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].email, "b@lot.test");
    }

    #[tokio::test]
    async fn update_and_touch_login() {
        let repo = repo().await;
        let user = repo.create(dto("a@lot.test", UserRole::Viewer)).await.unwrap();
        let updated = repo
            .update(
                user.user_id,
                UpdateUserDto {
                    role: Some(UserRole::Manager),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Manager);
        assert!(!updated.is_active);

        repo.touch_last_login(user.user_id).await.unwrap();
        let again = repo.find_by_id(user.user_id).await.unwrap().unwrap();
        assert!(again.last_login_at.is_some());
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let repo = repo().await;
        assert!(matches!(
            repo.update(42, UpdateUserDto::default()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(repo.delete(42).await, Err(DomainError::NotFound { .. })));
    }
}
