use models::types::Address;
use models::{customer, SoftDeletable};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::tickets::TicketView;

/// Customer fields accepted on create and update. A caller-supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInput {
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
    pub billing_address: Address,
    pub shipping_address: Address,
    pub number_of_employees: i32,
    pub rating: String,
    pub account_manager: String,
    pub state: String,
}

/// Customer as returned to callers, addresses nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
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
    pub billing_address: Address,
    pub shipping_address: Address,
    pub number_of_employees: i32,
    pub rating: String,
    pub account_manager: String,
    pub state: String,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

/// Customer with the live tickets it raised, as returned by a CRM id lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: CustomerView,
    pub tickets: Vec<TicketView>,
}

impl From<customer::Model> for CustomerView {
    fn from(m: customer::Model) -> Self {
        let billing_address = m.billing_address();
        let shipping_address = m.shipping_address();
        Self {
            id: m.id,
            crm_id: m.crm_id,
            name: m.name,
            email: m.email,
            company: m.company,
            r#type: m.r#type,
            industry: m.industry,
            annual_revenue: m.annual_revenue,
            phone: m.phone,
            fax: m.fax,
            website: m.website,
            billing_address,
            shipping_address,
            number_of_employees: m.number_of_employees,
            rating: m.rating,
            account_manager: m.account_manager,
            state: m.state,
            created_at: m.created_at,
            last_modified: m.last_modified,
            is_deleted: m.is_deleted,
        }
    }
}

impl CustomerInput {
    /// Copy every scalar and both addresses onto `am`; `crm_id` only when `with_crm_id`.
    pub(crate) fn apply(self, am: &mut customer::ActiveModel, with_crm_id: bool) {
        if with_crm_id {
            am.crm_id = Set(self.crm_id);
        }
        am.name = Set(self.name);
        am.email = Set(self.email);
        am.company = Set(self.company);
        am.r#type = Set(self.r#type);
        am.industry = Set(self.industry);
        am.annual_revenue = Set(self.annual_revenue);
        am.phone = Set(self.phone);
        am.fax = Set(self.fax);
        am.website = Set(self.website);
        am.number_of_employees = Set(self.number_of_employees);
        am.rating = Set(self.rating);
        am.account_manager = Set(self.account_manager);
        am.state = Set(self.state);
        am.set_billing_address(self.billing_address);
        am.set_shipping_address(self.shipping_address);
    }
}

pub(crate) async fn find_live_by_crm_id<C: ConnectionTrait>(
    conn: &C,
    crm_id: &str,
) -> Result<Option<customer::Model>, ServiceError> {
    Ok(customer::Entity::find_live()
        .filter(customer::Column::CrmId.eq(crm_id))
        .one(conn)
        .await?)
}

/// Reject a CRM id already held by another live customer. Blank ids are not tracked.
pub(crate) async fn ensure_crm_id_free<C: ConnectionTrait>(
    conn: &C,
    crm_id: &str,
    except: Option<i32>,
) -> Result<(), ServiceError> {
    if crm_id.trim().is_empty() {
        return Ok(());
    }
    match find_live_by_crm_id(conn, crm_id).await? {
        Some(other) if Some(other.id) != except => {
            Err(ServiceError::invariant(format!("crmId '{crm_id}' already exists")))
        }
        _ => Ok(()),
    }
}
