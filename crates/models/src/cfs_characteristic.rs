use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Characteristic owned by a customer-facing service; `position` keeps input order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cfs_characteristic")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub cfs_id: i32,
    pub name: String,
    pub value_type: String,
    pub configurable: bool,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CustomerFacingService,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CustomerFacingService => Entity::belongs_to(crate::customer_facing_service::Entity)
                .from(Column::CfsId)
                .to(crate::customer_facing_service::Column::Id)
                .into(),
        }
    }
}

impl Related<crate::customer_facing_service::Entity> for Entity {
    fn to() -> RelationDef { Relation::CustomerFacingService.def() }
}

impl ActiveModelBehavior for ActiveModel {}
