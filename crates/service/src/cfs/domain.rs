use models::types::{IntList, StringList};
use models::{cfs_characteristic, customer_facing_service};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacteristicInput {
    pub name: String,
    pub value_type: String,
    pub configurable: bool,
}

/// CFS fields accepted on create and update.
///
/// `characteristics` and `activationSequence` are replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CfsInput {
    pub name: String,
    pub category: String,
    pub lifecycle_state: String,
    pub version: String,
    pub service_spec_ids: Vec<i32>,
    pub activation_sequence: Vec<String>,
    pub characteristics: Vec<CharacteristicInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacteristicView {
    pub name: String,
    pub value_type: String,
    pub configurable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfsView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub lifecycle_state: String,
    pub version: String,
    pub service_spec_ids: Vec<i32>,
    pub activation_sequence: Vec<String>,
    pub characteristics: Vec<CharacteristicView>,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

impl From<cfs_characteristic::Model> for CharacteristicView {
    fn from(c: cfs_characteristic::Model) -> Self {
        Self { name: c.name, value_type: c.value_type, configurable: c.configurable }
    }
}

impl CfsView {
    pub(crate) fn new(m: customer_facing_service::Model, characteristics: Vec<cfs_characteristic::Model>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            category: m.category,
            lifecycle_state: m.lifecycle_state,
            version: m.version,
            service_spec_ids: m.service_spec_ids.0,
            activation_sequence: m.activation_sequence.0,
            characteristics: characteristics.into_iter().map(CharacteristicView::from).collect(),
            created_at: m.created_at,
            last_modified: m.last_modified,
            is_deleted: m.is_deleted,
        }
    }
}

impl CfsInput {
    pub(crate) fn apply(&self, am: &mut customer_facing_service::ActiveModel) {
        am.name = Set(self.name.clone());
        am.category = Set(self.category.clone());
        am.lifecycle_state = Set(self.lifecycle_state.clone());
        am.version = Set(self.version.clone());
        am.service_spec_ids = Set(IntList(self.service_spec_ids.clone()));
        am.activation_sequence = Set(StringList(self.activation_sequence.clone()));
    }

    pub(crate) fn characteristic_rows(&self, cfs_id: i32) -> Vec<cfs_characteristic::ActiveModel> {
        self.characteristics
            .iter()
            .zip(0..)
            .map(|(c, position)| cfs_characteristic::ActiveModel {
                cfs_id: Set(cfs_id),
                name: Set(c.name.clone()),
                value_type: Set(c.value_type.clone()),
                configurable: Set(c.configurable),
                position: Set(position),
                ..Default::default()
            })
            .collect()
    }
}

/// Characteristics of the given services in input order.
pub(crate) async fn load_characteristics<C: ConnectionTrait>(
    conn: &C,
    cfs_ids: &[i32],
) -> Result<Vec<cfs_characteristic::Model>, ServiceError> {
    if cfs_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(cfs_characteristic::Entity::find()
        .filter(cfs_characteristic::Column::CfsId.is_in(cfs_ids.iter().copied()))
        .order_by_asc(cfs_characteristic::Column::CfsId)
        .order_by_asc(cfs_characteristic::Column::Position)
        .all(conn)
        .await?)
}
