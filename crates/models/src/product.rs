use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::{IntList, StringList};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sku: String,
    pub name: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price_one_off: Option<f64>,
    pub price_monthly: Option<f64>,
    /// Fulfilment steps, in order.
    #[sea_orm(column_type = "Json")]
    pub sequence: StringList,
    /// Customer-facing services this product depends on.
    #[sea_orm(column_type = "Json")]
    pub cfs_ids: IntList,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    OfferingComponent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::OfferingComponent => Entity::has_many(crate::product_offering_component::Entity).into(),
        }
    }
}

impl Related<crate::product_offering_component::Entity> for Entity {
    fn to() -> RelationDef { Relation::OfferingComponent.def() }
}

impl ActiveModelBehavior for ActiveModel {}
