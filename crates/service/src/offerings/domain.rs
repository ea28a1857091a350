use std::collections::HashSet;

use models::types::{PricePlan, StringList};
use models::{product, product_offering, product_offering_component, SoftDeletable};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

fn default_quantity() -> i32 { 1 }
fn default_billing() -> String { "oneOff".into() }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInput {
    pub product_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default = "default_billing")]
    pub billing: String,
}

/// Offering fields accepted on create and update.
///
/// `components` and `activationSequence` are replaced as a whole; leaving
/// them out clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferingInput {
    pub name: String,
    pub status: String,
    pub description: String,
    pub price_plan: PricePlan,
    pub activation_sequence: Vec<String>,
    pub components: Vec<ComponentInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentView {
    pub product_id: i32,
    pub quantity: i32,
    pub billing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingView {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub description: String,
    pub price_plan: PricePlan,
    pub activation_sequence: Vec<String>,
    pub components: Vec<ComponentView>,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

impl From<product_offering_component::Model> for ComponentView {
    fn from(c: product_offering_component::Model) -> Self {
        Self { product_id: c.product_id, quantity: c.quantity, billing: c.billing }
    }
}

impl OfferingView {
    pub(crate) fn new(m: product_offering::Model, components: Vec<product_offering_component::Model>) -> Self {
        let price_plan = m.price_plan();
        Self {
            id: m.id,
            name: m.name,
            status: m.status,
            description: m.description,
            price_plan,
            activation_sequence: m.activation_sequence.0,
            components: components.into_iter().map(ComponentView::from).collect(),
            created_at: m.created_at,
            last_modified: m.last_modified,
            is_deleted: m.is_deleted,
        }
    }
}

impl OfferingInput {
    /// Copy scalars, price plan and activation sequence; components are handled separately.
    pub(crate) fn apply(&self, am: &mut product_offering::ActiveModel) {
        am.name = Set(self.name.clone());
        am.status = Set(self.status.clone());
        am.description = Set(self.description.clone());
        am.activation_sequence = Set(StringList(self.activation_sequence.clone()));
        am.set_price_plan(self.price_plan.clone());
    }

    pub(crate) fn component_rows(&self, offering_id: i32) -> Vec<product_offering_component::ActiveModel> {
        self.components
            .iter()
            .map(|c| product_offering_component::ActiveModel {
                product_offering_id: Set(offering_id),
                product_id: Set(c.product_id),
                quantity: Set(c.quantity),
                billing: Set(c.billing.clone()),
            })
            .collect()
    }
}

/// Components must name distinct, live products.
pub(crate) async fn validate_components<C: ConnectionTrait>(conn: &C, components: &[ComponentInput]) -> Result<(), ServiceError> {
    let mut seen = HashSet::new();
    for c in components {
        if !seen.insert(c.product_id) {
            return Err(ServiceError::invariant(format!("product {} listed more than once", c.product_id)));
        }
    }
    if seen.is_empty() {
        return Ok(());
    }
    let live = product::Entity::find_live()
        .filter(product::Column::Id.is_in(seen.iter().copied()))
        .all(conn)
        .await?;
    if live.len() != seen.len() {
        let found: HashSet<i32> = live.iter().map(|p| p.id).collect();
        let mut missing: Vec<i32> = seen.difference(&found).copied().collect();
        missing.sort_unstable();
        return Err(ServiceError::invariant(format!("unknown product ids in components: {missing:?}")));
    }
    Ok(())
}

pub(crate) async fn load_components<C: ConnectionTrait>(
    conn: &C,
    offering_ids: &[i32],
) -> Result<Vec<product_offering_component::Model>, ServiceError> {
    if offering_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(product_offering_component::Entity::find()
        .filter(product_offering_component::Column::ProductOfferingId.is_in(offering_ids.iter().copied()))
        .order_by_asc(product_offering_component::Column::ProductOfferingId)
        .order_by_asc(product_offering_component::Column::ProductId)
        .all(conn)
        .await?)
}
