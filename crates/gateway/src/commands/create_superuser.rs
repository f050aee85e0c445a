//! Create-superuser command - bootstraps the first privileged account so the
//! role-gated registration endpoint becomes reachable.

use auth_service::Registration;
use common::AppResult;
use infra::Database;

use crate::cli::CreateSuperuserArgs;
use crate::config::GatewayConfig;
use crate::state::AppState;

pub async fn execute(args: CreateSuperuserArgs, config: GatewayConfig) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    let superuser = config.roles.superuser_role();
    let state = AppState::new(db, &config.jwt, config.roles);

    let user = state
        .auth
        .register(
            superuser,
            Registration {
                username: args.username,
                email: args.email,
                password: args.password,
                first_name: args.first_name,
                last_names: args.last_names,
                address: None,
                role: Some(superuser),
            },
        )
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Superuser created");
    Ok(())
}
