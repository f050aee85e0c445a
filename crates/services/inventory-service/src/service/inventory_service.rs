//! Inventory reconciliation service.
//!
//! Every write recomputes `value = quantity * buy_price` from the product's
//! current price; the repository does the read and the write in one
//! transaction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{summarize_by_category, CategorySummary, InventoryRegister, RegisterLine};
use infra::{CategoryRepository, InventoryRepository};

#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Open a register for a product with its initial quantity
    async fn create_register(&self, product_id: i32, quantity: f64)
        -> AppResult<InventoryRegister>;

    /// Visible registers with display numbers, product and category names
    async fn list_all(&self) -> AppResult<Vec<RegisterLine>>;

    async fn get_register(&self, product_id: i32) -> AppResult<InventoryRegister>;

    /// Overwrite the quantity and recompute the value
    async fn update_quantity(&self, product_id: i32, quantity: f64)
        -> AppResult<InventoryRegister>;

    async fn soft_delete(&self, product_id: i32) -> AppResult<()>;

    /// Quantity and value totals per category, ordered by category name
    async fn summary_by_category(&self) -> AppResult<Vec<CategorySummary>>;
}

pub struct InventoryReconciler {
    inventory: Arc<dyn InventoryRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl InventoryReconciler {
    pub fn new(
        inventory: Arc<dyn InventoryRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            inventory,
            categories,
        }
    }

    async fn visible_register(&self, product_id: i32) -> AppResult<InventoryRegister> {
        self.inventory
            .find_by_product(product_id)
            .await?
            .ok_or_not_found("Inventory register")
    }
}

#[async_trait]
impl InventoryService for InventoryReconciler {
    async fn create_register(
        &self,
        product_id: i32,
        quantity: f64,
    ) -> AppResult<InventoryRegister> {
        let register = self.inventory.open(product_id, quantity).await?;
        tracing::info!(
            product_id,
            quantity,
            value = register.value,
            "Inventory register opened"
        );
        Ok(register)
    }

    async fn list_all(&self) -> AppResult<Vec<RegisterLine>> {
        let rows = self.inventory.list_visible().await?;
        let names: HashMap<i32, String> = self
            .categories
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, (register, product))| RegisterLine {
                n: i + 1,
                register_id: register.id,
                product_id: product.id,
                product_name: product.product_name,
                category_name: names
                    .get(&product.category_id)
                    .cloned()
                    .unwrap_or_default(),
                quantity: register.quantity,
                value: register.value,
            })
            .collect())
    }

    async fn get_register(&self, product_id: i32) -> AppResult<InventoryRegister> {
        self.visible_register(product_id).await
    }

    async fn update_quantity(
        &self,
        product_id: i32,
        quantity: f64,
    ) -> AppResult<InventoryRegister> {
        let register = self.inventory.save_quantity(product_id, quantity).await?;
        tracing::info!(
            product_id,
            quantity,
            value = register.value,
            "Inventory quantity updated"
        );
        Ok(register)
    }

    async fn soft_delete(&self, product_id: i32) -> AppResult<()> {
        let register = self.visible_register(product_id).await?;
        self.inventory.soft_delete(register.id).await?;
        tracing::info!(product_id, "Inventory register deleted");
        Ok(())
    }

    async fn summary_by_category(&self) -> AppResult<Vec<CategorySummary>> {
        let lines = self.list_all().await?;
        Ok(summarize_by_category(&lines))
    }
}
