//! Repository container and transaction helpers.
//!
//! `Persistence` centralizes access to every repository behind trait objects
//! so services can be wired against either the SeaORM stores or mocks.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionError};

use super::repositories::{
    CategoryRepository, CategoryStore, InventoryRepository, InventoryStore, ProductRepository,
    ProductStore, ReferenceRepository, ReferenceStore, UserRepository, UserStore,
};
use common::AppError;

/// All repositories sharing one connection pool.
#[derive(Clone)]
pub struct Persistence {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub inventory: Arc<dyn InventoryRepository>,
    pub reference: Arc<dyn ReferenceRepository>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            categories: Arc::new(CategoryStore::new(db.clone())),
            products: Arc::new(ProductStore::new(db.clone())),
            inventory: Arc::new(InventoryStore::new(db.clone())),
            reference: Arc::new(ReferenceStore::new(db)),
        }
    }
}

/// Flatten a transaction failure into the application error.
///
/// Connection failures (begin/commit) become `Database`; errors raised inside
/// the transaction body are returned as-is after the rollback.
pub(crate) fn transaction_error(err: TransactionError<AppError>) -> AppError {
    match err {
        TransactionError::Connection(db_err) => AppError::Database(db_err),
        TransactionError::Transaction(app_err) => app_err,
    }
}
