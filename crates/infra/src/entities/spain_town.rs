use sea_orm::entity::prelude::*;

use domain::SpainTown;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "spain_towns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub province_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spain_province::Entity",
        from = "Column::ProvinceId",
        to = "super::spain_province::Column::Id"
    )]
    SpainProvince,
}

impl Related<super::spain_province::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpainProvince.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SpainTown {
    fn from(model: Model) -> Self {
        SpainTown {
            id: model.id,
            name: model.name,
            province_id: model.province_id,
        }
    }
}
