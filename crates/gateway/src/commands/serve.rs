//! Serve command - starts the HTTP server.

use common::{AppError, AppResult};
use infra::{seed::seed_reference_data, Database, Persistence};

use crate::cli::ServeArgs;
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

pub async fn execute(args: ServeArgs, config: GatewayConfig) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Migrations run on connect
    let db = Database::connect(&config.database).await?;

    let repos = Persistence::new(db.get_connection());
    seed_reference_data(repos.reference.as_ref(), &config.roles).await?;

    let state = AppState::new(db, &config.jwt, config.roles);
    let app = create_router(state, &config.cors_origins);

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
