//! End-to-end API tests.
//!
//! Each test drives the real router against a fresh in-memory SQLite
//! database with migrations and reference data applied.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_service::Registration;
use common::config::{DatabaseConfig, JwtConfig};
use domain::{RolePolicy, ROLE_ADMINISTRATOR, ROLE_EMPLOYEE, ROLE_MANAGER, ROLE_SUPERUSER};
use gateway::{create_router, AppState};
use infra::{seed::seed_reference_data, Database, Persistence};

const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
const ROOT_PASSWORD: &str = "root-password";

// =============================================================================
// Harness
// =============================================================================

async fn spawn_app() -> Router {
    let db = Database::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .expect("in-memory database");

    let policy = RolePolicy::default();
    let repos = Persistence::new(db.get_connection());
    seed_reference_data(repos.reference.as_ref(), &policy)
        .await
        .expect("seed reference data");

    let state = AppState::new(db, &JwtConfig::new(JWT_SECRET, 168), policy);
    state
        .auth
        .register(
            ROLE_SUPERUSER,
            Registration {
                username: "root".to_string(),
                email: "root@stockroom.test".to_string(),
                password: ROOT_PASSWORD.to_string(),
                first_name: "Root".to_string(),
                last_names: "Admin".to_string(),
                address: None,
                role: Some(ROLE_SUPERUSER),
            },
        )
        .await
        .expect("bootstrap superuser");

    create_router(state, &[])
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn root_token(app: &Router) -> String {
    login(app, "root", ROOT_PASSWORD).await
}

async fn create_user(app: &Router, token: &str, username: &str, role: i32) -> (StatusCode, Value) {
    call(
        app,
        Method::POST,
        "/api/v1/user/create-new-user",
        Some(token),
        Some(json!({
            "username": username,
            "email": format!("{}@x.com", username),
            "password": "secret1",
            "first_name": "Test",
            "last_names": "User",
            "role": role,
        })),
    )
    .await
}

async fn create_category(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/categories/new-category",
        Some(token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_i64().unwrap()
}

async fn create_product(
    app: &Router,
    token: &str,
    bar_code: &str,
    name: &str,
    buy_price: f64,
    category_id: i64,
) -> i64 {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/products/new-product",
        Some(token),
        Some(json!({
            "bar_code": bar_code,
            "product_name": name,
            "buy_price": buy_price,
            "sell_price": buy_price * 1.5,
            "category_id": category_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_i64().unwrap()
}

async fn open_register(app: &Router, token: &str, product_id: i64, quantity: f64) -> Value {
    let (status, body) = call(
        app,
        Method::POST,
        &format!("/api/v1/inventory/create-register/{}", product_id),
        Some(token),
        Some(json!({ "quantity": quantity })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

// =============================================================================
// Health & reference data
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let (status, body) = call(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_address_data_is_public() {
    let app = spawn_app().await;

    let (status, body) = call(&app, Method::GET, "/api/v1/address/all-address-data", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["provinces"].as_array().unwrap().len(), 52);
    assert!(!body["data"]["towns"].as_array().unwrap().is_empty());
    assert!(!body["data"]["address_types"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_roles_listing_requires_allow_list() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    create_user(&app, &root, "clerk", ROLE_EMPLOYEE).await;
    let clerk = login(&app, "clerk", "secret1").await;

    let (status, body) = call(&app, Method::GET, "/api/v1/roles/all-roles", Some(&root), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, _) = call(&app, Method::GET, "/api/v1/roles/all-roles", Some(&clerk), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Credential & session gate
// =============================================================================

#[tokio::test]
async fn test_register_then_duplicate_is_conflict() {
    let app = spawn_app().await;
    let root = root_token(&app).await;

    let (status, body) = create_user(&app, &root, "jdoe", ROLE_EMPLOYEE).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["username"], "jdoe");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = create_user(&app, &root, "jdoe", ROLE_EMPLOYEE).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = spawn_app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({ "username": "root", "password": "not-the-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["ok"], false);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_login_unknown_user_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({ "username": "ghost", "password": "secret1" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_login_by_email_and_me() {
    let app = spawn_app().await;

    let token = login(&app, "ROOT@Stockroom.Test", ROOT_PASSWORD).await;
    assert!(token.starts_with("Bearer "));

    let (status, body) = call(&app, Method::GET, "/api/v1/user/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "root");
    assert_eq!(body["data"]["email"], "root@stockroom.test");
}

#[tokio::test]
async fn test_username_cannot_look_like_email() {
    let app = spawn_app().await;
    let root = root_token(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/user/create-new-user",
        Some(&root),
        Some(json!({
            "username": "root@stockroom.test",
            "email": "impostor@x.com",
            "password": "secret1",
            "first_name": "Im",
            "last_names": "Postor",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username cannot contain '@'");
}

#[tokio::test]
async fn test_admin_cannot_delete_superuser() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    create_user(&app, &root, "admin", ROLE_ADMINISTRATOR).await;
    let admin = login(&app, "admin", "secret1").await;

    let (_, me) = call(&app, Method::GET, "/api/v1/user/me", Some(&root), None).await;
    let root_id = me["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/user/{}", root_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    root_token(&app).await;
}

#[tokio::test]
async fn test_non_numeric_id_is_validation_error() {
    let app = spawn_app().await;
    let root = root_token(&app).await;

    let (status, body) = call(&app, Method::GET, "/api/v1/products/abc", Some(&root), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = spawn_app().await;

    let (status, body) = call(&app, Method::GET, "/api/v1/categories/all-categories", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_token_is_forbidden() {
    let app = spawn_app().await;

    let (status, _) = call(
        &app,
        Method::GET,
        "/api/v1/categories/all-categories",
        Some("Bearer not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
        &app,
        Method::GET,
        "/api/v1/categories/all-categories",
        Some("Token abc"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employee_cannot_register_users() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    create_user(&app, &root, "clerk", ROLE_EMPLOYEE).await;
    let clerk = login(&app, "clerk", "secret1").await;

    let (status, _) = create_user(&app, &clerk, "intruder", ROLE_EMPLOYEE).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = call(&app, Method::GET, "/api/v1/user/all-users", Some(&root), None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["root", "clerk"]);
}

#[tokio::test]
async fn test_deleted_user_cannot_login() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let (_, body) = create_user(&app, &root, "leaver", ROLE_EMPLOYEE).await;
    let user_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/user/{}", user_id),
        Some(&root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({ "username": "leaver", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The username stays reserved
    let (status, _) = create_user(&app, &root, "leaver", ROLE_EMPLOYEE).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_duplicate_category_is_conflict() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    create_category(&app, &root, "Tools").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/categories/new-category",
        Some(&root),
        Some(json!({ "name": "Tools" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Category already exists");
}

#[tokio::test]
async fn test_concurrent_category_creation_leaves_one_row() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let body = json!({ "name": "Tools" });

    let (first, second) = tokio::join!(
        call(
            &app,
            Method::POST,
            "/api/v1/categories/new-category",
            Some(&root),
            Some(body.clone()),
        ),
        call(
            &app,
            Method::POST,
            "/api/v1/categories/new-category",
            Some(&root),
            Some(body.clone()),
        ),
    );

    let mut statuses = vec![first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let (_, list) = call(&app, Method::GET, "/api/v1/categories/all-categories", Some(&root), None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_employee_cannot_delete_category() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    create_user(&app, &root, "clerk", ROLE_EMPLOYEE).await;
    let clerk = login(&app, "clerk", "secret1").await;
    let category_id = create_category(&app, &clerk, "Tools").await;

    let (status, body) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/categories/{}", category_id),
        Some(&clerk),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (_, list) = call(&app, Method::GET, "/api/v1/categories/all-categories", Some(&clerk), None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_category_delete_cascades_to_products() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let category_id = create_category(&app, &root, "Tools").await;
    let product_id = create_product(&app, &root, "123", "Widget", 10.0, category_id).await;
    open_register(&app, &root, product_id, 5.0).await;

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/categories/{}", category_id),
        Some(&root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, products) = call(&app, Method::GET, "/api/v1/products/all-products", Some(&root), None).await;
    assert!(products["data"].as_array().unwrap().is_empty());

    let (_, registers) = call(&app, Method::GET, "/api/v1/inventory/all-registers", Some(&root), None).await;
    assert!(registers["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_validation_and_missing_category() {
    let app = spawn_app().await;
    let root = root_token(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/products/new-product",
        Some(&root),
        Some(json!({
            "bar_code": "123",
            "product_name": "Widget",
            "buy_price": -1.0,
            "category_id": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/products/new-product",
        Some(&root),
        Some(json!({
            "bar_code": "123",
            "product_name": "Widget",
            "buy_price": 10.0,
            "category_id": 999,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_delete_reports_per_item() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let category_id = create_category(&app, &root, "Tools").await;
    let first = create_product(&app, &root, "1", "Hammer", 5.0, category_id).await;
    let second = create_product(&app, &root, "2", "Saw", 7.0, category_id).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/products/bulk-delete",
        Some(&root),
        Some(json!({ "ids": [first, second, 999] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let outcomes = body["data"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["ok"], true);
    assert_eq!(outcomes[1]["ok"], true);
    assert_eq!(outcomes[2]["id"], 999);
    assert_eq!(outcomes[2]["ok"], false);

    let (_, products) = call(&app, Method::GET, "/api/v1/products/all-products", Some(&root), None).await;
    assert!(products["data"].as_array().unwrap().is_empty());
}

// =============================================================================
// Inventory reconciliation
// =============================================================================

#[tokio::test]
async fn test_register_value_follows_quantity() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let category_id = create_category(&app, &root, "Tools").await;
    let product_id = create_product(&app, &root, "123", "Widget", 10.0, category_id).await;

    let body = open_register(&app, &root, product_id, 5.0).await;
    assert_eq!(body["data"]["value"], 50.0);

    let uri = format!("/api/v1/inventory/change-quantity/{}", product_id);
    for _ in 0..2 {
        let (status, body) = call(
            &app,
            Method::PUT,
            &uri,
            Some(&root),
            Some(json!({ "quantity": 8.0, "value": 1.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["quantity"], 8.0);
        assert_eq!(body["data"]["value"], 80.0);
    }

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/inventory/{}", product_id),
        Some(&root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["value"], 80.0);
}

#[tokio::test]
async fn test_register_rules() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let category_id = create_category(&app, &root, "Tools").await;
    let product_id = create_product(&app, &root, "123", "Widget", 10.0, category_id).await;
    let uri = format!("/api/v1/inventory/create-register/{}", product_id);

    let (status, _) = call(&app, Method::POST, &uri, Some(&root), Some(json!({ "quantity": -1.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/inventory/create-register/999",
        Some(&root),
        Some(json!({ "quantity": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    open_register(&app, &root, product_id, 1.0).await;
    let (status, _) = call(&app, Method::POST, &uri, Some(&root), Some(json!({ "quantity": 1.0 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/v1/inventory/change-quantity/999",
        Some(&root),
        Some(json!({ "quantity": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_soft_deleted_register_is_hidden_and_revivable() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let category_id = create_category(&app, &root, "Tools").await;
    let hammer = create_product(&app, &root, "1", "Hammer", 5.0, category_id).await;
    let saw = create_product(&app, &root, "2", "Saw", 7.0, category_id).await;
    open_register(&app, &root, hammer, 2.0).await;
    open_register(&app, &root, saw, 3.0).await;

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/inventory/{}", hammer),
        Some(&root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, Method::GET, "/api/v1/inventory/all-registers", Some(&root), None).await;
    let lines = body["data"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["n"], 1);
    assert_eq!(lines[0]["product_name"], "Saw");
    assert_eq!(lines[0]["category_name"], "Tools");

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/v1/inventory/{}", hammer),
        Some(&root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = open_register(&app, &root, hammer, 4.0).await;
    assert_eq!(body["data"]["value"], 20.0);
}

#[tokio::test]
async fn test_buy_price_change_revalues_register() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let category_id = create_category(&app, &root, "Tools").await;
    let product_id = create_product(&app, &root, "123", "Widget", 10.0, category_id).await;
    open_register(&app, &root, product_id, 5.0).await;

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/products/{}", product_id),
        Some(&root),
        Some(json!({ "buy_price": 12.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/inventory/{}", product_id),
        Some(&root),
        None,
    )
    .await;
    assert_eq!(body["data"]["value"], 60.0);
}

#[tokio::test]
async fn test_deleting_product_hides_its_register() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    let category_id = create_category(&app, &root, "Tools").await;
    let product_id = create_product(&app, &root, "123", "Widget", 10.0, category_id).await;
    open_register(&app, &root, product_id, 5.0).await;

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/products/{}", product_id),
        Some(&root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, Method::GET, "/api/v1/inventory/all-registers", Some(&root), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_is_manager_only() {
    let app = spawn_app().await;
    let root = root_token(&app).await;
    create_user(&app, &root, "boss", ROLE_MANAGER).await;
    let manager = login(&app, "boss", "secret1").await;

    let tools = create_category(&app, &root, "Tools").await;
    let food = create_category(&app, &root, "Food").await;
    let hammer = create_product(&app, &root, "1", "Hammer", 10.0, tools).await;
    let saw = create_product(&app, &root, "2", "Saw", 20.0, tools).await;
    let bread = create_product(&app, &root, "3", "Bread", 2.0, food).await;
    open_register(&app, &root, hammer, 5.0).await;
    open_register(&app, &root, saw, 1.0).await;
    open_register(&app, &root, bread, 2.0).await;

    let uri = "/api/v1/inventory/summary-by-category";
    let (status, _) = call(&app, Method::GET, uri, Some(&root), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, Method::GET, uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);

    let summary = body["data"].as_array().unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0]["category_name"], "Food");
    assert_eq!(summary[0]["total_value"], 4.0);
    assert_eq!(summary[1]["category_name"], "Tools");
    assert_eq!(summary[1]["total_quantity"], 6.0);
    assert_eq!(summary[1]["total_value"], 70.0);
}
