use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product included in an offering. Keyed by (offering, product).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_offering_component")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_offering_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
    pub quantity: i32,
    pub billing: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ProductOffering,
    Product,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ProductOffering => Entity::belongs_to(crate::product_offering::Entity)
                .from(Column::ProductOfferingId)
                .to(crate::product_offering::Column::Id)
                .into(),
            Relation::Product => Entity::belongs_to(crate::product::Entity)
                .from(Column::ProductId)
                .to(crate::product::Column::Id)
                .into(),
        }
    }
}

impl Related<crate::product_offering::Entity> for Entity {
    fn to() -> RelationDef { Relation::ProductOffering.def() }
}

impl Related<crate::product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl ActiveModelBehavior for ActiveModel {}
