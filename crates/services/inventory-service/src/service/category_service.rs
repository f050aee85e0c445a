//! Category service.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::Category;
use infra::CategoryRepository;

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    async fn get_category(&self, id: i32) -> AppResult<Category>;

    /// Create a category; the name must be unused
    async fn create_category(&self, name: &str, created_by: Option<i32>) -> AppResult<Category>;

    async fn rename_category(&self, id: i32, name: &str) -> AppResult<Category>;

    /// Delete a category together with its products and their registers
    async fn delete_category(&self, id: i32) -> AppResult<()>;
}

pub struct CategoryManager {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryManager {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }
}

fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Category name is required"));
    }
    Ok(name.to_string())
}

#[async_trait]
impl CategoryService for CategoryManager {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.list().await
    }

    async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_not_found("Category")
    }

    async fn create_category(&self, name: &str, created_by: Option<i32>) -> AppResult<Category> {
        let category = self.categories.create(clean_name(name)?, created_by).await?;
        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    async fn rename_category(&self, id: i32, name: &str) -> AppResult<Category> {
        self.categories.rename(id, clean_name(name)?).await
    }

    async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.categories.delete(id).await?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
