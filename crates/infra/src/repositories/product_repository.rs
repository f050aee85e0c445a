//! Product repository. Products are soft-deleted together with their register.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::entities::inventory_register::{self, Entity as RegisterEntity};
use crate::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::unit_of_work::transaction_error;
use common::{unique_violation, AppError, AppResult, OptionExt};
use domain::{stock_value, NewProduct, Product, ProductUpdate};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Active products ordered by id
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// Find active product by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Insert a product; a duplicate bar code or name is `Conflict`
    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    /// Apply a partial update. When the buy price changes, the product's
    /// register value is recomputed in the same transaction.
    async fn update(&self, id: i32, changes: ProductUpdate) -> AppResult<Product>;

    /// Soft delete the product and its register in one transaction
    async fn soft_delete(&self, id: i32) -> AppResult<()>;
}

pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::DeletedAt.is_null())
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .filter(product::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(Product::from))
    }

    async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            bar_code: Set(new_product.bar_code),
            product_name: Set(new_product.product_name),
            description: Set(new_product.description),
            buy_price: Set(new_product.buy_price),
            sell_price: Set(new_product.sell_price),
            image_url: Set(new_product.image_url),
            category_id: Set(new_product.category_id),
            created_by: Set(new_product.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(unique_violation("Product"))?;
        Ok(Product::from(model))
    }

    async fn update(&self, id: i32, changes: ProductUpdate) -> AppResult<Product> {
        self.db
            .transaction::<_, Product, AppError>(|txn| {
                Box::pin(async move {
                    let model = ProductEntity::find_by_id(id)
                        .filter(product::Column::DeletedAt.is_null())
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or_not_found("Product")?;

                    let reprice = changes.changes_buy_price(&Product::from(model.clone()));
                    let now = chrono::Utc::now();
                    let mut active: ActiveModel = model.into();

                    if let Some(bar_code) = changes.bar_code {
                        active.bar_code = Set(bar_code);
                    }
                    if let Some(product_name) = changes.product_name {
                        active.product_name = Set(product_name);
                    }
                    if let Some(description) = changes.description {
                        active.description = Set(Some(description));
                    }
                    if let Some(buy_price) = changes.buy_price {
                        active.buy_price = Set(buy_price);
                    }
                    if let Some(sell_price) = changes.sell_price {
                        active.sell_price = Set(sell_price);
                    }
                    if let Some(image_url) = changes.image_url {
                        active.image_url = Set(Some(image_url));
                    }
                    if let Some(category_id) = changes.category_id {
                        active.category_id = Set(category_id);
                    }
                    active.updated_at = Set(now);

                    let updated = active
                        .update(txn)
                        .await
                        .map_err(unique_violation("Product"))?;

                    if reprice {
                        let register = RegisterEntity::find()
                            .filter(inventory_register::Column::ProductId.eq(id))
                            .one(txn)
                            .await?;

                        if let Some(register) = register {
                            let value = stock_value(register.quantity, updated.buy_price)?;
                            let mut active: inventory_register::ActiveModel = register.into();
                            active.value = Set(value);
                            active.updated_at = Set(now);
                            active.update(txn).await?;
                            tracing::debug!(product_id = id, value, "Register value recomputed");
                        }
                    }

                    Ok(Product::from(updated))
                })
            })
            .await
            .map_err(transaction_error)
    }

    async fn soft_delete(&self, id: i32) -> AppResult<()> {
        self.db
            .transaction::<_, (), AppError>(|txn| {
                Box::pin(async move {
                    let model = ProductEntity::find_by_id(id)
                        .filter(product::Column::DeletedAt.is_null())
                        .one(txn)
                        .await?
                        .ok_or_not_found("Product")?;

                    let now = chrono::Utc::now();
                    let mut active: ActiveModel = model.into();
                    active.deleted_at = Set(Some(now));
                    active.updated_at = Set(now);
                    active.update(txn).await?;

                    let register = RegisterEntity::find()
                        .filter(inventory_register::Column::ProductId.eq(id))
                        .filter(inventory_register::Column::DeletedAt.is_null())
                        .one(txn)
                        .await?;

                    if let Some(register) = register {
                        let mut active: inventory_register::ActiveModel = register.into();
                        active.deleted_at = Set(Some(now));
                        active.updated_at = Set(now);
                        active.update(txn).await?;
                    }

                    Ok(())
                })
            })
            .await
            .map_err(transaction_error)
    }
}
