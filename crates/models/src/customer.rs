use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::types::Address;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub crm_id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub r#type: String,
    pub industry: String,
    pub annual_revenue: f64,
    pub phone: String,
    pub fax: String,
    pub website: String,
    pub number_of_employees: i32,
    pub rating: String,
    pub account_manager: String,
    pub state: String,
    pub billing_street: String,
    pub billing_city: String,
    pub billing_state: String,
    pub billing_postal_code: String,
    pub billing_country: String,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub shipping_country: String,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Ticket,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Ticket => Entity::has_many(crate::ticket::Entity).into() }
    }
}

impl Related<crate::ticket::Entity> for Entity {
    fn to() -> RelationDef { Relation::Ticket.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn billing_address(&self) -> Address {
        Address {
            street: self.billing_street.clone(),
            city: self.billing_city.clone(),
            state: self.billing_state.clone(),
            postal_code: self.billing_postal_code.clone(),
            country: self.billing_country.clone(),
        }
    }

    pub fn shipping_address(&self) -> Address {
        Address {
            street: self.shipping_street.clone(),
            city: self.shipping_city.clone(),
            state: self.shipping_state.clone(),
            postal_code: self.shipping_postal_code.clone(),
            country: self.shipping_country.clone(),
        }
    }
}

impl ActiveModel {
    pub fn set_billing_address(&mut self, a: Address) {
        self.billing_street = Set(a.street);
        self.billing_city = Set(a.city);
        self.billing_state = Set(a.state);
        self.billing_postal_code = Set(a.postal_code);
        self.billing_country = Set(a.country);
    }

    pub fn set_shipping_address(&mut self, a: Address) {
        self.shipping_street = Set(a.street);
        self.shipping_city = Set(a.city);
        self.shipping_state = Set(a.state);
        self.shipping_postal_code = Set(a.postal_code);
        self.shipping_country = Set(a.country);
    }
}
