//! Repository traits and their SeaORM implementations.
//!
//! By default every query excludes soft-deleted rows. Methods that need to see
//! them say so in their name (`*_with_deleted`).

mod category_repository;
mod inventory_repository;
mod product_repository;
mod reference_repository;
mod user_repository;

pub use category_repository::{CategoryRepository, CategoryStore};
pub use inventory_repository::{InventoryRepository, InventoryStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use reference_repository::{ReferenceRepository, ReferenceStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use inventory_repository::MockInventoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use reference_repository::MockReferenceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
