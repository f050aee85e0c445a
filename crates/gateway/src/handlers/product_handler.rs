//! Product handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use common::{ApiResponse, AppResult, Created};
use domain::{NewProduct, Product, ProductUpdate};
use inventory_service::{BulkDeleteOutcome, ProductView};

use crate::extractors::{PathParam, ValidatedJson};
use crate::middleware::{require_allowed, require_login, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Bar code is required"))]
    pub bar_code: String,
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Buy price cannot be negative"))]
    pub buy_price: f64,
    #[validate(range(min = 0.0, message = "Sell price cannot be negative"))]
    #[serde(default)]
    pub sell_price: f64,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    pub category_id: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Bar code cannot be empty"))]
    pub bar_code: Option<String>,
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub product_name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Buy price cannot be negative"))]
    pub buy_price: Option<f64>,
    #[validate(range(min = 0.0, message = "Sell price cannot be negative"))]
    pub sell_price: Option<f64>,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, message = "At least one product id is required"))]
    pub ids: Vec<i32>,
}

pub fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all-products", get(list_products))
        .route("/new-product", post(create_product))
        .route(
            "/bulk-delete",
            post(bulk_delete).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_allowed,
            )),
        )
        .route(
            "/:product_id",
            get(get_product).merge(
                put(update_product)
                    .delete(delete_product)
                    .route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_allowed,
                    )),
            ),
        )
        .route_layer(middleware::from_fn_with_state(state, require_login))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ProductView>>> {
    let products = state.products.list_products().await?;
    Ok(ApiResponse::success("Product list", products))
}

pub async fn get_product(
    State(state): State<AppState>,
    PathParam(product_id): PathParam<i32>,
) -> AppResult<ApiResponse<ProductView>> {
    let product = state.products.get_product(product_id).await?;
    Ok(ApiResponse::success("Product", product))
}

pub async fn create_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created<Product>> {
    let product = state
        .products
        .create_product(NewProduct {
            bar_code: payload.bar_code,
            product_name: payload.product_name,
            description: payload.description,
            buy_price: payload.buy_price,
            sell_price: payload.sell_price,
            image_url: payload.image_url,
            category_id: payload.category_id,
            created_by: Some(current_user.id),
        })
        .await?;
    Ok(Created::new("Product created", product))
}

/// Partial update; a new buy price re-values the product's register
pub async fn update_product(
    State(state): State<AppState>,
    PathParam(product_id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<ApiResponse<Product>> {
    let changes = ProductUpdate {
        bar_code: payload.bar_code,
        product_name: payload.product_name,
        description: payload.description,
        buy_price: payload.buy_price,
        sell_price: payload.sell_price,
        image_url: payload.image_url,
        category_id: payload.category_id,
    };

    let product = state.products.update_product(product_id, changes).await?;
    Ok(ApiResponse::success("Product updated", product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    PathParam(product_id): PathParam<i32>,
) -> AppResult<ApiResponse<()>> {
    state.products.delete_product(product_id).await?;
    Ok(ApiResponse::message("Product deleted"))
}

pub async fn bulk_delete(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkDeleteRequest>,
) -> AppResult<ApiResponse<Vec<BulkDeleteOutcome>>> {
    let outcomes = state.products.bulk_delete(payload.ids).await?;
    Ok(ApiResponse::success("Bulk delete processed", outcomes))
}
