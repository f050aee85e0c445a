//! Read-only reference data (roles, address data) and the seed bookkeeping
//! that fills it.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::entities::{address_type, role, seed_marker, spain_province, spain_town};
use common::AppResult;
use domain::{AddressData, AddressType, Role, SpainProvince, SpainTown};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Provinces, towns and address types, each ordered by id
    async fn address_data(&self) -> AppResult<AddressData>;

    /// Roles stored in the database, ordered by tier
    async fn roles(&self) -> AppResult<Vec<Role>>;

    /// Upsert role names by tier
    async fn sync_roles(&self, roles: Vec<Role>) -> AppResult<()>;

    async fn is_seeded(&self, name: &str) -> AppResult<bool>;

    /// Record a seed step as applied; recording it twice is a no-op
    async fn mark_seeded(&self, name: &str) -> AppResult<()>;

    /// Insert address data, skipping rows whose id already exists
    async fn insert_address_data(&self, data: AddressData) -> AppResult<()>;
}

pub struct ReferenceStore {
    db: DatabaseConnection,
}

impl ReferenceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReferenceRepository for ReferenceStore {
    async fn address_data(&self) -> AppResult<AddressData> {
        let provinces = spain_province::Entity::find()
            .order_by_asc(spain_province::Column::Id)
            .all(&self.db)
            .await?;
        let towns = spain_town::Entity::find()
            .order_by_asc(spain_town::Column::Id)
            .all(&self.db)
            .await?;
        let address_types = address_type::Entity::find()
            .order_by_asc(address_type::Column::Id)
            .all(&self.db)
            .await?;

        Ok(AddressData {
            provinces: provinces.into_iter().map(SpainProvince::from).collect(),
            towns: towns.into_iter().map(SpainTown::from).collect(),
            address_types: address_types.into_iter().map(AddressType::from).collect(),
        })
    }

    async fn roles(&self) -> AppResult<Vec<Role>> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Tier)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Role::from).collect())
    }

    async fn sync_roles(&self, roles: Vec<Role>) -> AppResult<()> {
        if roles.is_empty() {
            return Ok(());
        }

        let models = roles.into_iter().map(|r| role::ActiveModel {
            tier: Set(r.tier),
            name: Set(r.name),
        });

        role::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(role::Column::Tier)
                    .update_column(role::Column::Name)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn is_seeded(&self, name: &str) -> AppResult<bool> {
        let marker = seed_marker::Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await?;
        Ok(marker.is_some())
    }

    async fn mark_seeded(&self, name: &str) -> AppResult<()> {
        let marker = seed_marker::ActiveModel {
            name: Set(name.to_string()),
            applied_at: Set(chrono::Utc::now()),
        };

        seed_marker::Entity::insert(marker)
            .on_conflict(
                OnConflict::column(seed_marker::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn insert_address_data(&self, data: AddressData) -> AppResult<()> {
        if !data.provinces.is_empty() {
            let models = data.provinces.into_iter().map(|p| spain_province::ActiveModel {
                id: Set(p.id),
                name: Set(p.name),
            });
            spain_province::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(spain_province::Column::Id)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await?;
        }

        if !data.towns.is_empty() {
            let models = data.towns.into_iter().map(|t| spain_town::ActiveModel {
                id: Set(t.id),
                name: Set(t.name),
                province_id: Set(t.province_id),
            });
            spain_town::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(spain_town::Column::Id)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await?;
        }

        if !data.address_types.is_empty() {
            let models = data.address_types.into_iter().map(|a| address_type::ActiveModel {
                id: Set(a.id),
                name: Set(a.name),
            });
            address_type::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(address_type::Column::Id)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await?;
        }

        Ok(())
    }
}
