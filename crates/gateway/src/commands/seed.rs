//! Seed command - loads role names and address reference data.

use common::AppResult;
use infra::{seed::seed_reference_data, Database, Persistence};

use crate::config::GatewayConfig;

pub async fn execute(config: GatewayConfig) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    let repos = Persistence::new(db.get_connection());

    if seed_reference_data(repos.reference.as_ref(), &config.roles).await? {
        tracing::info!("Reference data seeded");
    } else {
        tracing::info!("Reference data already present, nothing to do");
    }

    Ok(())
}
