//! Infrastructure layer - persistence for the whole workspace.
//!
//! - Database connection management and migrations
//! - SeaORM entities (kept separate from domain models)
//! - Repository traits and their SeaORM implementations
//! - Reference-data seeding run at startup

mod db;
pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod seed;
mod unit_of_work;

pub use db::Database;
pub use migrations::Migrator;
pub use repositories::{
    CategoryRepository, CategoryStore, InventoryRepository, InventoryStore, ProductRepository,
    ProductStore, ReferenceRepository, ReferenceStore, UserRepository, UserStore,
};
pub use unit_of_work::Persistence;

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCategoryRepository, MockInventoryRepository, MockProductRepository,
    MockReferenceRepository, MockUserRepository,
};
