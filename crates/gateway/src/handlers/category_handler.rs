//! Category handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use common::{ApiResponse, AppResult, Created};
use domain::Category;

use crate::extractors::{PathParam, ValidatedJson};
use crate::middleware::{require_allowed, require_login, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: String,
}

pub fn category_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all-categories", get(list_categories))
        .route("/new-category", post(create_category))
        .route(
            "/:category_id",
            put(rename_category)
                .delete(delete_category)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_allowed,
                )),
        )
        .route_layer(middleware::from_fn_with_state(state, require_login))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories = state.categories.list_categories().await?;
    Ok(ApiResponse::success("Category list", categories))
}

pub async fn create_category(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<Created<Category>> {
    let category = state
        .categories
        .create_category(&payload.name, Some(current_user.id))
        .await?;
    Ok(Created::new("Category created", category))
}

pub async fn rename_category(
    State(state): State<AppState>,
    PathParam(category_id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<ApiResponse<Category>> {
    let category = state
        .categories
        .rename_category(category_id, &payload.name)
        .await?;
    Ok(ApiResponse::success("Category updated", category))
}

/// Hard delete; the category's products and registers go with it
pub async fn delete_category(
    State(state): State<AppState>,
    PathParam(category_id): PathParam<i32>,
) -> AppResult<ApiResponse<()>> {
    state.categories.delete_category(category_id).await?;
    Ok(ApiResponse::message("Category deleted"))
}
