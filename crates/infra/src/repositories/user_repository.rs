//! User repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{unique_violation, AppResult, OptionExt};
use domain::{NewUser, User, UserUpdate};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find an active user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find an active user by stored (lowercase) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user. Username or email collisions (including soft-deleted
    /// rows) surface as `Conflict`.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply a partial update to an active user
    async fn update(&self, id: i32, changes: UserUpdate) -> AppResult<User>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn soft_delete(&self, id: i32) -> AppResult<()>;

    /// List all active users ordered by id
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active_model(&self, id: i32) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or_not_found("User")
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            first_name: Set(new_user.first_name),
            last_names: Set(new_user.last_names),
            address: Set(new_user.address),
            role: Set(new_user.role),
            is_registered: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(unique_violation("User"))?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UserUpdate) -> AppResult<User> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();

        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_names) = changes.last_names {
            active.last_names = Set(last_names);
        }
        if let Some(address) = changes.address {
            active.address = Set(Some(address));
        }
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();
        let now = chrono::Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
