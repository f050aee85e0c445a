//! SeaORM entity definitions.
//!
//! These are database-specific entities separate from domain models; each
//! module converts its `Model` into the matching domain type.

pub mod address_type;
pub mod category;
pub mod inventory_register;
pub mod product;
pub mod role;
pub mod seed_marker;
pub mod spain_province;
pub mod spain_town;
pub mod user;
