//! Inventory register repository.
//!
//! Writes that set a register's value read the product's `buy_price` and
//! store the register in one transaction, with the product row locked, so a
//! concurrent price change cannot leave a stale value behind.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::inventory_register::{self, ActiveModel, Entity as RegisterEntity};
use crate::entities::product;
use crate::unit_of_work::transaction_error;
use common::{unique_violation, AppError, AppResult, OptionExt};
use domain::{stock_value, InventoryRegister, Product};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Visible register for a product
    async fn find_by_product(&self, product_id: i32) -> AppResult<Option<InventoryRegister>>;

    /// Visible registers of active products, joined with their product,
    /// ordered by register id
    async fn list_visible(&self) -> AppResult<Vec<(InventoryRegister, Product)>>;

    /// Open a register for an active product valued at its current price.
    ///
    /// A soft-deleted register is revived; a visible one is `Conflict`.
    async fn open(&self, product_id: i32, quantity: f64) -> AppResult<InventoryRegister>;

    /// Overwrite the quantity of a visible register and revalue it at the
    /// product's current price
    async fn save_quantity(&self, product_id: i32, quantity: f64)
        -> AppResult<InventoryRegister>;

    async fn soft_delete(&self, register_id: i32) -> AppResult<()>;
}

pub struct InventoryStore {
    db: DatabaseConnection,
}

impl InventoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Active product row, locked for the rest of the transaction where the
/// backend supports row locks.
async fn locked_product(txn: &DatabaseTransaction, product_id: i32) -> AppResult<product::Model> {
    product::Entity::find_by_id(product_id)
        .filter(product::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_not_found("Product")
}

async fn write_figures<C: ConnectionTrait>(
    conn: &C,
    model: inventory_register::Model,
    quantity: f64,
    value: f64,
) -> AppResult<InventoryRegister> {
    let mut active: ActiveModel = model.into();
    active.quantity = Set(quantity);
    active.value = Set(value);
    active.deleted_at = Set(None);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(conn).await?;
    Ok(InventoryRegister::from(model))
}

#[async_trait]
impl InventoryRepository for InventoryStore {
    async fn find_by_product(&self, product_id: i32) -> AppResult<Option<InventoryRegister>> {
        let result = RegisterEntity::find()
            .filter(inventory_register::Column::ProductId.eq(product_id))
            .filter(inventory_register::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(InventoryRegister::from))
    }

    async fn list_visible(&self) -> AppResult<Vec<(InventoryRegister, Product)>> {
        let rows = RegisterEntity::find()
            .find_also_related(product::Entity)
            .filter(inventory_register::Column::DeletedAt.is_null())
            .filter(product::Column::DeletedAt.is_null())
            .order_by_asc(inventory_register::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(register, product)| {
                product.map(|p| (InventoryRegister::from(register), Product::from(p)))
            })
            .collect())
    }

    async fn open(&self, product_id: i32, quantity: f64) -> AppResult<InventoryRegister> {
        self.db
            .transaction::<_, InventoryRegister, AppError>(|txn| {
                Box::pin(async move {
                    let product = locked_product(txn, product_id).await?;
                    let value = stock_value(quantity, product.buy_price)?;

                    let existing = RegisterEntity::find()
                        .filter(inventory_register::Column::ProductId.eq(product_id))
                        .one(txn)
                        .await?;

                    match existing {
                        Some(model) if model.deleted_at.is_none() => {
                            Err(AppError::conflict("Inventory register"))
                        }
                        Some(model) => write_figures(txn, model, quantity, value).await,
                        None => {
                            let now = chrono::Utc::now();
                            let model = ActiveModel {
                                product_id: Set(product_id),
                                quantity: Set(quantity),
                                value: Set(value),
                                created_at: Set(now),
                                updated_at: Set(now),
                                deleted_at: Set(None),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await
                            .map_err(unique_violation("Inventory register"))?;
                            Ok(InventoryRegister::from(model))
                        }
                    }
                })
            })
            .await
            .map_err(transaction_error)
    }

    async fn save_quantity(
        &self,
        product_id: i32,
        quantity: f64,
    ) -> AppResult<InventoryRegister> {
        self.db
            .transaction::<_, InventoryRegister, AppError>(|txn| {
                Box::pin(async move {
                    let product = locked_product(txn, product_id).await?;

                    let register = RegisterEntity::find()
                        .filter(inventory_register::Column::ProductId.eq(product_id))
                        .filter(inventory_register::Column::DeletedAt.is_null())
                        .one(txn)
                        .await?
                        .ok_or_not_found("Inventory register")?;

                    let value = stock_value(quantity, product.buy_price)?;
                    write_figures(txn, register, quantity, value).await
                })
            })
            .await
            .map_err(transaction_error)
    }

    async fn soft_delete(&self, register_id: i32) -> AppResult<()> {
        let model = RegisterEntity::find_by_id(register_id)
            .filter(inventory_register::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or_not_found("Inventory register")?;

        let now = chrono::Utc::now();
        let mut active: ActiveModel = model.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        Ok(())
    }
}
