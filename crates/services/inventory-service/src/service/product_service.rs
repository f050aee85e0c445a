//! Product catalog service.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{NewProduct, Product, ProductUpdate};
use infra::{CategoryRepository, ProductRepository};

/// A product together with the name of its category.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

/// Result of deleting one product in a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkDeleteOutcome {
    pub id: i32,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[async_trait]
pub trait ProductService: Send + Sync {
    /// Active products with their category names
    async fn list_products(&self) -> AppResult<Vec<ProductView>>;

    async fn get_product(&self, id: i32) -> AppResult<ProductView>;

    async fn create_product(&self, product: NewProduct) -> AppResult<Product>;

    async fn update_product(&self, id: i32, changes: ProductUpdate) -> AppResult<Product>;

    /// Soft delete the product and its register
    async fn delete_product(&self, id: i32) -> AppResult<()>;

    /// Delete each id independently and report per-item outcomes
    async fn bulk_delete(&self, ids: Vec<i32>) -> AppResult<Vec<BulkDeleteOutcome>>;
}

pub struct ProductCatalog {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductCatalog {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    async fn ensure_category(&self, category_id: i32) -> AppResult<String> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_not_found("Category")?;
        Ok(category.name)
    }
}

#[async_trait]
impl ProductService for ProductCatalog {
    async fn list_products(&self) -> AppResult<Vec<ProductView>> {
        let products = self.products.list().await?;
        let names: HashMap<i32, String> = self
            .categories
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(products
            .into_iter()
            .map(|product| ProductView {
                category_name: names.get(&product.category_id).cloned(),
                product,
            })
            .collect())
    }

    async fn get_product(&self, id: i32) -> AppResult<ProductView> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product")?;
        let category_name = self
            .categories
            .find_by_id(product.category_id)
            .await?
            .map(|c| c.name);

        Ok(ProductView {
            product,
            category_name,
        })
    }

    async fn create_product(&self, mut product: NewProduct) -> AppResult<Product> {
        product.bar_code = product.bar_code.trim().to_string();
        product.product_name = product.product_name.trim().to_string();
        product.validate()?;
        self.ensure_category(product.category_id).await?;

        let product = self.products.create(product).await?;
        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: i32, changes: ProductUpdate) -> AppResult<Product> {
        changes.validate()?;
        if let Some(category_id) = changes.category_id {
            self.ensure_category(category_id).await?;
        }

        self.products.update(id, changes).await
    }

    async fn delete_product(&self, id: i32) -> AppResult<()> {
        self.products.soft_delete(id).await?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn bulk_delete(&self, ids: Vec<i32>) -> AppResult<Vec<BulkDeleteOutcome>> {
        let ids: BTreeSet<i32> = ids.into_iter().collect();
        if ids.is_empty() {
            return Err(AppError::validation("No product ids given"));
        }

        let results = join_all(ids.iter().map(|&id| self.products.soft_delete(id))).await;

        let outcomes: Vec<BulkDeleteOutcome> = ids
            .into_iter()
            .zip(results)
            .map(|(id, result)| match result {
                Ok(()) => BulkDeleteOutcome {
                    id,
                    ok: true,
                    error: None,
                },
                Err(e) => BulkDeleteOutcome {
                    id,
                    ok: false,
                    error: Some(e.user_message()),
                },
            })
            .collect();

        let deleted = outcomes.iter().filter(|o| o.ok).count();
        tracing::info!(requested = outcomes.len(), deleted, "Bulk product delete");
        Ok(outcomes)
    }
}
