//! OpenAPI document. The schema types below mirror the JSON the catalog
//! exchanges; they exist for documentation only.

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(ToSchema, Serialize)]
pub struct ErrorDoc {
    pub error: String,
    pub message: Option<String>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDoc {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDoc {
    pub id: Option<i32>,
    pub crm_id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub industry: String,
    pub annual_revenue: f64,
    pub phone: String,
    pub fax: String,
    pub website: String,
    pub billing_address: AddressDoc,
    pub shipping_address: AddressDoc,
    pub number_of_employees: i32,
    pub rating: String,
    pub account_manager: String,
    pub state: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailDoc {
    #[serde(flatten)]
    pub customer: CustomerDoc,
    pub tickets: Vec<TicketDoc>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: Option<i32>,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price_one_off: Option<f64>,
    pub price_monthly: Option<f64>,
    pub sequence: Vec<String>,
    pub cfs_ids: Vec<i32>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePlanDoc {
    #[schema(example = "USD")]
    pub currency: String,
    pub setup_fee: f64,
    pub monthly_fee: f64,
    #[schema(example = "calendarMonthly")]
    pub billing_cycle: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    pub product_id: i32,
    #[schema(example = 1)]
    pub quantity: i32,
    #[schema(example = "oneOff")]
    pub billing: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingDoc {
    pub id: Option<i32>,
    pub name: String,
    pub status: String,
    pub description: String,
    pub price_plan: PricePlanDoc,
    pub activation_sequence: Vec<String>,
    /// Replaced as a whole on update; an empty list clears it.
    pub components: Vec<ComponentDoc>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacteristicDoc {
    pub name: String,
    pub value_type: String,
    pub configurable: bool,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CfsDoc {
    pub id: Option<i32>,
    pub name: String,
    pub category: String,
    pub lifecycle_state: String,
    pub version: String,
    pub service_spec_ids: Vec<i32>,
    pub activation_sequence: Vec<String>,
    pub characteristics: Vec<CharacteristicDoc>,
}

/// Absent fields are left unchanged on update. `title`, `owner` and
/// `customerId` may be sent with `subject`, `assignee` and `requesterId`
/// and take precedence over them.
#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInputDoc {
    pub ds_id: Option<String>,
    pub requester_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub customer_crm_id: Option<String>,
    pub subject: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "NEW")]
    pub status: Option<String>,
    #[schema(example = "LOW")]
    pub priority: Option<String>,
    pub submitter: Option<String>,
    pub assignee: Option<String>,
    pub owner: Option<String>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInputDoc {
    pub ds_id: Option<String>,
    pub comment: String,
    pub author: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDoc {
    pub id: i32,
    pub ticket_id: i32,
    #[schema(example = "DSC-20240601120000123-1a2b3c4d")]
    pub ds_id: String,
    pub comment: String,
    pub author: String,
    pub created_at: String,
    pub last_modified: String,
    pub is_deleted: bool,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDoc {
    pub id: i32,
    #[schema(example = "DS-20240601120000123-1a2b3c4d")]
    pub ds_id: String,
    pub requester_id: i32,
    pub customer_crm_id: String,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub submitter: String,
    pub assignee: String,
    pub comments: Vec<CommentDoc>,
    pub created_at: String,
    pub last_modified: String,
    pub is_deleted: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::list,
        crate::routes::customers::create,
        crate::routes::customers::get_one,
        crate::routes::customers::get_by_crm_id,
        crate::routes::customers::update,
        crate::routes::customers::update_by_crm_id,
        crate::routes::customers::remove,
        crate::routes::customers::remove_by_crm_id,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::get_one,
        crate::routes::products::update,
        crate::routes::products::remove,
        crate::routes::offerings::list,
        crate::routes::offerings::create,
        crate::routes::offerings::get_one,
        crate::routes::offerings::update,
        crate::routes::offerings::remove,
        crate::routes::cfs::list,
        crate::routes::cfs::create,
        crate::routes::cfs::get_one,
        crate::routes::cfs::update,
        crate::routes::cfs::remove,
        crate::routes::tickets::list,
        crate::routes::tickets::create,
        crate::routes::tickets::get_one,
        crate::routes::tickets::get_by_ds_id,
        crate::routes::tickets::update,
        crate::routes::tickets::update_by_ds_id,
        crate::routes::tickets::remove,
        crate::routes::tickets::remove_by_ds_id,
        crate::routes::tickets::comments,
        crate::routes::tickets::comments_by_ds_id,
        crate::routes::tickets::add_comment,
        crate::routes::tickets::add_comment_by_ds_id,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            AddressDoc,
            CustomerDoc,
            CustomerDetailDoc,
            ProductDoc,
            PricePlanDoc,
            ComponentDoc,
            OfferingDoc,
            CharacteristicDoc,
            CfsDoc,
            TicketInputDoc,
            TicketDoc,
            CommentInputDoc,
            CommentDoc,
        )
    ),
    modifiers(&ApiKeyScheme),
    security(("api_key" = [])),
    tags(
        (name = "health"),
        (name = "customers"),
        (name = "products"),
        (name = "offerings"),
        (name = "cfs"),
        (name = "tickets")
    )
)]
pub struct ApiDoc;

struct ApiKeyScheme;

impl utoipa::Modify for ApiKeyScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("api_key", SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("ApiKey"))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/customers/external/{crmId}", "/offerings/{id}", "/tickets/external/{dsId}/comments", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["components"]["securitySchemes"]["api_key"].is_object());
    }
}
