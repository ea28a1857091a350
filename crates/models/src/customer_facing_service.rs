use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::{IntList, StringList};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_facing_service")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: String,
    pub lifecycle_state: String,
    pub version: String,
    #[sea_orm(column_type = "Json")]
    pub service_spec_ids: IntList,
    #[sea_orm(column_type = "Json")]
    pub activation_sequence: StringList,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Characteristic,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Characteristic => Entity::has_many(crate::cfs_characteristic::Entity).into() }
    }
}

impl Related<crate::cfs_characteristic::Entity> for Entity {
    fn to() -> RelationDef { Relation::Characteristic.def() }
}

impl ActiveModelBehavior for ActiveModel {}
