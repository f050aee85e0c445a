//! Reference data queries: configured roles and address data.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{AddressData, Role, RolePolicy};
use infra::ReferenceRepository;

#[async_trait]
pub trait ReferenceService: Send + Sync {
    /// Configured role tiers and names
    fn list_roles(&self) -> Vec<Role>;

    /// Provinces, towns and address types in one payload
    async fn all_address_data(&self) -> AppResult<AddressData>;
}

pub struct ReferenceCatalog {
    reference: Arc<dyn ReferenceRepository>,
    policy: Arc<RolePolicy>,
}

impl ReferenceCatalog {
    pub fn new(reference: Arc<dyn ReferenceRepository>, policy: Arc<RolePolicy>) -> Self {
        Self { reference, policy }
    }
}

#[async_trait]
impl ReferenceService for ReferenceCatalog {
    fn list_roles(&self) -> Vec<Role> {
        self.policy.roles()
    }

    async fn all_address_data(&self) -> AppResult<AddressData> {
        self.reference.address_data().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::SpainProvince;
    use infra::MockReferenceRepository;

    #[test]
    fn test_roles_come_from_policy() {
        let service = ReferenceCatalog::new(
            Arc::new(MockReferenceRepository::new()),
            Arc::new(RolePolicy::default()),
        );

        let roles = service.list_roles();
        assert_eq!(roles.len(), 4);
        assert_eq!(roles[0].name, "Employee");
        assert_eq!(roles[3].tier, 4);
    }

    #[tokio::test]
    async fn test_address_data_passthrough() {
        let mut repo = MockReferenceRepository::new();
        repo.expect_address_data().returning(|| {
            Ok(AddressData {
                provinces: vec![SpainProvince {
                    id: 28,
                    name: "Madrid".to_string(),
                }],
                ..Default::default()
            })
        });

        let service = ReferenceCatalog::new(Arc::new(repo), Arc::new(RolePolicy::default()));
        let data = service.all_address_data().await.unwrap();
        assert_eq!(data.provinces[0].name, "Madrid");
    }
}
