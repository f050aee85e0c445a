//! Inventory reconciliation and the product catalog.
//!
//! Keeps each product's stock quantity and derived value consistent, and
//! serves the catalog and reference data the inventory screens rely on.

pub mod service;

pub use service::{
    BulkDeleteOutcome, CategoryManager, CategoryService, InventoryReconciler, InventoryService,
    ProductCatalog, ProductService, ProductView, ReferenceCatalog, ReferenceService,
};
