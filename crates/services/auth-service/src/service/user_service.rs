//! User service - account queries and maintenance.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{RolePolicy, User, UserUpdate};
use infra::UserRepository;

use crate::token::Claims;

#[async_trait]
pub trait UserService: Send + Sync {
    /// Get active user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List all active users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update an account. Callers may edit themselves; editing someone else
    /// or changing a role requires the allow-list.
    async fn update_user(&self, requester: &Claims, id: i32, changes: UserUpdate)
        -> AppResult<User>;

    /// Soft delete an account other than the requester's own
    async fn delete_user(&self, requester: &Claims, id: i32) -> AppResult<()>;
}

pub struct UserManager {
    users: Arc<dyn UserRepository>,
    policy: Arc<RolePolicy>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>, policy: Arc<RolePolicy>) -> Self {
        Self { users, policy }
    }

    /// Only a superuser may modify or delete another superuser's account.
    async fn guard_superuser_target(&self, requester: &Claims, id: i32) -> AppResult<()> {
        if requester.id == id || self.policy.is_superuser(requester.role) {
            return Ok(());
        }

        let target = self.users.find_by_id(id).await?.ok_or_not_found("User")?;
        if self.policy.is_superuser(target.role) {
            tracing::warn!(user_id = id, by = requester.id, "Superuser account is protected");
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn update_user(
        &self,
        requester: &Claims,
        id: i32,
        changes: UserUpdate,
    ) -> AppResult<User> {
        if changes.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let privileged = self.policy.is_allowed(requester.role);
        if requester.id != id && !privileged {
            return Err(AppError::Forbidden);
        }
        if let Some(role) = changes.role {
            if !privileged {
                return Err(AppError::Forbidden);
            }
            self.policy.can_grant(requester.role, role)?;
        }
        self.guard_superuser_target(requester, id).await?;

        let user = self.users.update(id, changes).await?;
        tracing::info!(user_id = id, by = requester.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, requester: &Claims, id: i32) -> AppResult<()> {
        if requester.id == id {
            return Err(AppError::validation("You cannot delete your own account"));
        }
        self.guard_superuser_target(requester, id).await?;

        self.users.soft_delete(id).await?;
        tracing::info!(user_id = id, by = requester.id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{ROLE_ADMINISTRATOR, ROLE_EMPLOYEE, ROLE_SUPERUSER};
    use infra::MockUserRepository;
    use mockall::predicate::eq;

    fn claims(id: i32, role: i32) -> Claims {
        Claims {
            id,
            role,
            username: format!("user{}", id),
            email: String::new(),
            first_name: String::new(),
            last_names: String::new(),
            iat: 0,
            exp: 0,
        }
    }

    fn user(id: i32) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@x.com", id),
            password_hash: "hashed".to_string(),
            first_name: "Test".to_string(),
            last_names: "User".to_string(),
            address: None,
            role: ROLE_EMPLOYEE,
            is_registered: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn manager(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), Arc::new(RolePolicy::default()))
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));

        let result = manager(repo).get_user(9).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_self_update_allowed() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .with(eq(5), mockall::predicate::always())
            .returning(|id, _| Ok(user(id)));

        let changes = UserUpdate {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        let result = manager(repo)
            .update_user(&claims(5, ROLE_EMPLOYEE), 5, changes)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_employee_cannot_update_others() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let changes = UserUpdate {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        let result = manager(repo)
            .update_user(&claims(5, ROLE_EMPLOYEE), 6, changes)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_employee_cannot_change_own_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let changes = UserUpdate {
            role: Some(ROLE_ADMINISTRATOR),
            ..Default::default()
        };
        let result = manager(repo)
            .update_user(&claims(5, ROLE_EMPLOYEE), 5, changes)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_admin_cannot_grant_superuser() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let changes = UserUpdate {
            role: Some(ROLE_SUPERUSER),
            ..Default::default()
        };
        let result = manager(repo)
            .update_user(&claims(1, ROLE_ADMINISTRATOR), 5, changes)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let mut repo = MockUserRepository::new();
        repo.expect_soft_delete().never();

        let result = manager(repo)
            .delete_user(&claims(1, ROLE_SUPERUSER), 1)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_other_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(user(id))));
        repo.expect_soft_delete()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(()));

        let result = manager(repo)
            .delete_user(&claims(1, ROLE_ADMINISTRATOR), 2)
            .await;
        assert!(result.is_ok());
    }

    fn superuser_account(id: i32) -> User {
        let mut account = user(id);
        account.role = ROLE_SUPERUSER;
        account
    }

    #[tokio::test]
    async fn test_admin_cannot_modify_superuser() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(9))
            .returning(|id| Ok(Some(superuser_account(id))));
        repo.expect_update().never();
        repo.expect_soft_delete().never();
        let service = manager(repo);

        let demote = UserUpdate {
            role: Some(ROLE_EMPLOYEE),
            ..Default::default()
        };
        let result = service
            .update_user(&claims(1, ROLE_ADMINISTRATOR), 9, demote)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));

        let rename = UserUpdate {
            first_name: Some("Mallory".to_string()),
            ..Default::default()
        };
        let result = service
            .update_user(&claims(1, ROLE_ADMINISTRATOR), 9, rename)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));

        let result = service.delete_user(&claims(1, ROLE_ADMINISTRATOR), 9).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_superuser_can_modify_superuser() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_update()
            .with(eq(9), mockall::predicate::always())
            .times(1)
            .returning(|id, _| Ok(user(id)));

        let demote = UserUpdate {
            role: Some(ROLE_EMPLOYEE),
            ..Default::default()
        };
        let result = manager(repo)
            .update_user(&claims(1, ROLE_SUPERUSER), 9, demote)
            .await;
        assert!(result.is_ok());
    }
}
