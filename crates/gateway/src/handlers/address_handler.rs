//! Public address reference data for registration forms.

use axum::{extract::State, routing::get, Router};

use common::{ApiResponse, AppResult};
use domain::AddressData;

use crate::state::AppState;

pub fn address_routes() -> Router<AppState> {
    Router::new().route("/all-address-data", get(all_address_data))
}

pub async fn all_address_data(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AddressData>> {
    let data = state.reference.all_address_data().await?;
    Ok(ApiResponse::success("Address data", data))
}
