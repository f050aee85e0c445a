//! Product database entity.

use sea_orm::entity::prelude::*;

use domain::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub bar_code: String,
    #[sea_orm(unique)]
    pub product_name: String,
    pub description: Option<String>,
    pub buy_price: f64,
    pub sell_price: f64,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(has_one = "super::inventory_register::Entity")]
    InventoryRegister,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::inventory_register::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryRegister.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            bar_code: model.bar_code,
            product_name: model.product_name,
            description: model.description,
            buy_price: model.buy_price,
            sell_price: model.sell_price,
            image_url: model.image_url,
            category_id: model.category_id,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
