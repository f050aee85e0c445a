//! Inventory register handlers.
//!
//! Every route needs a valid session; the per-category summary additionally
//! needs the manager role.

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use common::{ApiResponse, AppResult, Created};
use domain::{CategorySummary, InventoryRegister, RegisterLine};

use crate::extractors::{PathParam, ValidatedJson};
use crate::middleware::require_manager;
use crate::state::AppState;

/// New on-hand quantity. The stored value is always derived server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct QuantityRequest {
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,
}

pub fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create-register/:product_id", post(create_register))
        .route("/all-registers", get(list_registers))
        .route(
            "/summary-by-category",
            get(summary_by_category)
                .route_layer(middleware::from_fn_with_state(state, require_manager)),
        )
        .route(
            "/change-quantity/:product_id",
            post(update_quantity).put(update_quantity),
        )
        .route("/:product_id", get(get_register).delete(delete_register))
}

pub async fn create_register(
    State(state): State<AppState>,
    PathParam(product_id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<QuantityRequest>,
) -> AppResult<Created<InventoryRegister>> {
    let register = state
        .inventory
        .create_register(product_id, payload.quantity)
        .await?;
    Ok(Created::new("Inventory register created", register))
}

pub async fn list_registers(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RegisterLine>>> {
    let lines = state.inventory.list_all().await?;
    Ok(ApiResponse::success("Inventory registers", lines))
}

pub async fn get_register(
    State(state): State<AppState>,
    PathParam(product_id): PathParam<i32>,
) -> AppResult<ApiResponse<InventoryRegister>> {
    let register = state.inventory.get_register(product_id).await?;
    Ok(ApiResponse::success("Inventory register", register))
}

pub async fn update_quantity(
    State(state): State<AppState>,
    PathParam(product_id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<QuantityRequest>,
) -> AppResult<ApiResponse<InventoryRegister>> {
    let register = state
        .inventory
        .update_quantity(product_id, payload.quantity)
        .await?;
    Ok(ApiResponse::success("Quantity updated", register))
}

pub async fn delete_register(
    State(state): State<AppState>,
    PathParam(product_id): PathParam<i32>,
) -> AppResult<ApiResponse<()>> {
    state.inventory.soft_delete(product_id).await?;
    Ok(ApiResponse::message("Inventory register deleted"))
}

pub async fn summary_by_category(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CategorySummary>>> {
    let summary = state.inventory.summary_by_category().await?;
    Ok(ApiResponse::success("Inventory summary by category", summary))
}
