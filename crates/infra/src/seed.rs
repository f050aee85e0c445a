//! Reference-data seeding run at startup and by the `seed` command.
//!
//! Address data ships embedded in the binary. The sequence is guarded by a
//! seed marker, and every insert skips existing ids, so concurrent cold starts
//! converge on the same rows.

use common::{AppError, AppResult};
use domain::{AddressData, RolePolicy, SEED_ADDRESS_DATA};

use crate::repositories::ReferenceRepository;

const ADDRESS_DATA_JSON: &str = include_str!("../seed/address_data.json");

/// Parse the embedded address data.
pub fn embedded_address_data() -> AppResult<AddressData> {
    serde_json::from_str(ADDRESS_DATA_JSON)
        .map_err(|e| AppError::internal(format!("Invalid embedded address data: {}", e)))
}

/// Synchronise configured role names and seed address data once.
///
/// Returns `true` when the address data was inserted by this call.
pub async fn seed_reference_data(
    repo: &dyn ReferenceRepository,
    policy: &RolePolicy,
) -> AppResult<bool> {
    repo.sync_roles(policy.roles()).await?;
    tracing::debug!("Role names synchronised");

    if repo.is_seeded(SEED_ADDRESS_DATA).await? {
        tracing::debug!("Address data already seeded");
        return Ok(false);
    }

    let data = embedded_address_data()?;
    tracing::info!(
        provinces = data.provinces.len(),
        towns = data.towns.len(),
        address_types = data.address_types.len(),
        "Seeding address data"
    );

    repo.insert_address_data(data).await?;
    repo.mark_seeded(SEED_ADDRESS_DATA).await?;

    Ok(true)
}
