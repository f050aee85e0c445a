//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users and roles, the product catalog, inventory registers and the
//! address reference data shared by every service crate.

pub mod address;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod inventory;
pub mod password;
pub mod role;
pub mod user;

pub use address::{AddressData, AddressType, SpainProvince, SpainTown};
pub use catalog::{Category, NewProduct, Product, ProductUpdate};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use inventory::{
    stock_value, summarize_by_category, validate_amount, CategorySummary, InventoryRegister,
    RegisterLine,
};
pub use password::Password;
pub use role::{Role, RolePolicy};
pub use user::{NewUser, User, UserResponse, UserUpdate};
