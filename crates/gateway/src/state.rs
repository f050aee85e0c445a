//! Application state for dependency injection.

use std::sync::Arc;

use auth_service::{
    AccessGate, AuthService, Authenticator, TokenService, UserManager, UserService,
};
use common::config::JwtConfig;
use domain::RolePolicy;
use infra::{Database, Persistence};
use inventory_service::{
    CategoryManager, CategoryService, InventoryReconciler, InventoryService, ProductCatalog,
    ProductService, ReferenceCatalog, ReferenceService,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
    pub gate: AccessGate,
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub categories: Arc<dyn CategoryService>,
    pub products: Arc<dyn ProductService>,
    pub inventory: Arc<dyn InventoryService>,
    pub reference: Arc<dyn ReferenceService>,
}

impl AppState {
    /// Wire every service against the SeaORM repositories.
    pub fn new(db: Database, jwt: &JwtConfig, policy: RolePolicy) -> Self {
        let policy = Arc::new(policy);
        let repos = Persistence::new(db.get_connection());
        let tokens = TokenService::new(jwt);

        Self {
            gate: AccessGate::new(policy.clone()),
            auth: Arc::new(Authenticator::new(
                repos.users.clone(),
                tokens.clone(),
                policy.clone(),
            )),
            users: Arc::new(UserManager::new(repos.users.clone(), policy.clone())),
            categories: Arc::new(CategoryManager::new(repos.categories.clone())),
            products: Arc::new(ProductCatalog::new(
                repos.products.clone(),
                repos.categories.clone(),
            )),
            inventory: Arc::new(InventoryReconciler::new(
                repos.inventory.clone(),
                repos.categories.clone(),
            )),
            reference: Arc::new(ReferenceCatalog::new(repos.reference.clone(), policy)),
            tokens,
            db,
        }
    }
}
