use sea_orm::entity::prelude::*;

use domain::SpainProvince;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "spain_provinces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::spain_town::Entity")]
    SpainTown,
}

impl Related<super::spain_town::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpainTown.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SpainProvince {
    fn from(model: Model) -> Self {
        SpainProvince {
            id: model.id,
            name: model.name,
        }
    }
}
