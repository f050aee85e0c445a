//! Category repository. Categories are hard-deleted; the schema cascades the
//! delete to their products and registers.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::category::{self, ActiveModel, Entity as CategoryEntity};
use common::{unique_violation, AppError, AppResult, OptionExt};
use domain::Category;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name
    async fn list(&self) -> AppResult<Vec<Category>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    /// Single atomic insert; a duplicate name is `Conflict`
    async fn create(&self, name: String, created_by: Option<i32>) -> AppResult<Category>;

    async fn rename(&self, id: i32, name: String) -> AppResult<Category>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn list(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Category::from))
    }

    async fn create(&self, name: String, created_by: Option<i32>) -> AppResult<Category> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            name: Set(name),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(unique_violation("Category"))?;
        Ok(Category::from(model))
    }

    async fn rename(&self, id: i32, name: String) -> AppResult<Category> {
        let model = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Category")?;

        let mut active: ActiveModel = model.into();
        active.name = Set(name);
        active.updated_at = Set(chrono::Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(unique_violation("Category"))?;
        Ok(Category::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CategoryEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Category"));
        }

        Ok(())
    }
}
