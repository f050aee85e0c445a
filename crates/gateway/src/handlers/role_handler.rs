//! Role reference handler.

use axum::{extract::State, middleware, routing::get, Router};

use common::ApiResponse;
use domain::Role;

use crate::middleware::require_allowed;
use crate::state::AppState;

pub fn role_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all-roles", get(list_roles))
        .route_layer(middleware::from_fn_with_state(state, require_allowed))
}

pub async fn list_roles(State(state): State<AppState>) -> ApiResponse<Vec<Role>> {
    ApiResponse::success("Role list", state.reference.list_roles())
}
