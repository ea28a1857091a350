use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::types::{PricePlan, StringList};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_offering")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price_currency: String,
    pub price_setup_fee: f64,
    pub price_monthly_fee: f64,
    pub price_billing_cycle: String,
    #[sea_orm(column_type = "Json")]
    pub activation_sequence: StringList,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Component,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Component => Entity::has_many(crate::product_offering_component::Entity).into() }
    }
}

impl Related<crate::product_offering_component::Entity> for Entity {
    fn to() -> RelationDef { Relation::Component.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn price_plan(&self) -> PricePlan {
        PricePlan {
            currency: self.price_currency.clone(),
            setup_fee: self.price_setup_fee,
            monthly_fee: self.price_monthly_fee,
            billing_cycle: self.price_billing_cycle.clone(),
        }
    }
}

impl ActiveModel {
    pub fn set_price_plan(&mut self, p: PricePlan) {
        self.price_currency = Set(p.currency);
        self.price_setup_fee = Set(p.setup_fee);
        self.price_monthly_fee = Set(p.monthly_fee);
        self.price_billing_cycle = Set(p.billing_cycle);
    }
}
