//! User handlers: login, registration and account maintenance.

use axum::{
    extract::{Extension, State},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use auth_service::{LoginResponse, Registration};
use common::{ApiResponse, AppResult, Created};
use domain::{UserResponse, UserUpdate};

use crate::extractors::{PathParam, ValidatedJson};
use crate::middleware::{require_allowed, require_login, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email
    #[serde(alias = "email")]
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last names are required"))]
    pub last_names: String,
    pub address: Option<String>,
    pub role: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last names cannot be empty"))]
    pub last_names: Option<String>,
    pub address: Option<String>,
    pub role: Option<i32>,
}

/// Routes that need a session. Login is mounted separately.
pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/create-new-user",
            post(create_user).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_allowed,
            )),
        )
        .route(
            "/all-users",
            get(list_users).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_allowed,
            )),
        )
        .route("/me", get(get_current_user))
        .route(
            "/:user_id",
            put(update_user).merge(delete(delete_user).route_layer(
                middleware::from_fn_with_state(state.clone(), require_allowed),
            )),
        )
        .route_layer(middleware::from_fn_with_state(state, require_login))
}

/// Exchange credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let response = state.auth.login(&payload.username, &payload.password).await?;
    Ok(ApiResponse::success("Login successful", response))
}

/// Register a new account (allow-listed roles only)
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let registration = Registration {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_names: payload.last_names,
        address: payload.address,
        role: payload.role,
    };

    let user = state.auth.register(current_user.role, registration).await?;
    Ok(Created::new("User created", UserResponse::from(user)))
}

pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.users.get_user(current_user.id).await?;
    Ok(ApiResponse::success("Current user", UserResponse::from(user)))
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(ApiResponse::success(
        "User list",
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let changes = UserUpdate {
        first_name: payload.first_name,
        last_names: payload.last_names,
        address: payload.address,
        role: payload.role,
    };

    let user = state
        .users
        .update_user(&current_user, user_id, changes)
        .await?;
    Ok(ApiResponse::success("User updated", UserResponse::from(user)))
}

pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i32>,
) -> AppResult<ApiResponse<()>> {
    state.users.delete_user(&current_user, user_id).await?;
    Ok(ApiResponse::message("User deleted"))
}
