//! Application services for the catalog and inventory.

mod category_service;
mod inventory_service;
mod product_service;
mod reference_service;

pub use category_service::{CategoryManager, CategoryService};
pub use inventory_service::{InventoryReconciler, InventoryService};
pub use product_service::{BulkDeleteOutcome, ProductCatalog, ProductService, ProductView};
pub use reference_service::{ReferenceCatalog, ReferenceService};
