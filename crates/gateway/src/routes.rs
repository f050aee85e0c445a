//! Route configuration.

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    address_routes, category_routes, health_routes, inventory_routes, login, product_routes,
    role_routes, user_routes,
};
use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .nest(
            "/user",
            Router::new().route("/login", post(login)).merge(
                user_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
            ),
        )
        .nest(
            "/categories",
            category_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/products",
            product_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/inventory",
            inventory_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/roles",
            role_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest("/address", address_routes());

    Router::new()
        .nest("/health", health_routes())
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
