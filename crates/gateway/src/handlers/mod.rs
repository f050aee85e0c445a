//! HTTP handlers, one module per resource.

mod address_handler;
mod category_handler;
mod health_handler;
mod inventory_handler;
mod product_handler;
mod role_handler;
mod user_handler;

pub use address_handler::address_routes;
pub use category_handler::category_routes;
pub use health_handler::health_routes;
pub use inventory_handler::inventory_routes;
pub use product_handler::product_routes;
pub use role_handler::role_routes;
pub use user_handler::{login, user_routes};
