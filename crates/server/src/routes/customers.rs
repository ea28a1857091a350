use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use service::customers::*;

use super::{created, request_token};
use crate::auth::AppState;
use crate::errors::JsonApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list).post(create))
        .route("/customers/:id", get(get_one).put(update).delete(remove))
        .route(
            "/customers/external/:crm_id",
            get(get_by_crm_id).put(update_by_crm_id).delete(remove_by_crm_id),
        )
}

#[utoipa::path(
    get, path = "/customers", tag = "customers",
    responses((status = 200, description = "Live customers", body = [crate::openapi::CustomerDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerView>>, JsonApiError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.dispatcher.query(GetAllCustomers, &cancel).await?))
}

#[utoipa::path(
    post, path = "/customers", tag = "customers",
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 400, description = "crmId already in use", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<CustomerInput>) -> Result<Response, JsonApiError> {
    let (cancel, _guard) = request_token();
    let customer = state.dispatcher.send(CreateCustomer { customer: input }, &cancel).await?;
    Ok(created(format!("/customers/{}", customer.id), customer))
}

#[utoipa::path(
    get, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<CustomerView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .query(GetCustomerById { id }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("customer {id}")))
}

#[utoipa::path(
    get, path = "/customers/external/{crmId}", tag = "customers",
    params(("crmId" = String, Path, description = "CRM id")),
    responses(
        (status = 200, description = "Found, with its tickets", body = crate::openapi::CustomerDetailDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_crm_id(
    State(state): State<AppState>,
    Path(crm_id): Path<String>,
) -> Result<Json<CustomerDetail>, JsonApiError> {
    let (cancel, _guard) = request_token();
    let found = state.dispatcher.query(GetCustomerByCrmId { crm_id: crm_id.clone() }, &cancel).await?;
    found.map(Json).ok_or_else(|| JsonApiError::not_found(format!("customer '{crm_id}'")))
}

#[utoipa::path(
    put, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 400, description = "crmId already in use", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<CustomerView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .send(UpdateCustomer { id, customer: input }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("customer {id}")))
}

#[utoipa::path(
    put, path = "/customers/external/{crmId}", tag = "customers",
    params(("crmId" = String, Path, description = "CRM id; never changed by this call")),
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_by_crm_id(
    State(state): State<AppState>,
    Path(crm_id): Path<String>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<CustomerView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    let updated = state
        .dispatcher
        .send(UpdateCustomerByCrmId { crm_id: crm_id.clone(), customer: input }, &cancel)
        .await?;
    updated.map(Json).ok_or_else(|| JsonApiError::not_found(format!("customer '{crm_id}'")))
}

#[utoipa::path(
    delete, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<(), JsonApiError> {
    let (cancel, _guard) = request_token();
    if state.dispatcher.send(DeleteCustomer { id }, &cancel).await? {
        Ok(())
    } else {
        Err(JsonApiError::not_found(format!("customer {id}")))
    }
}

#[utoipa::path(
    delete, path = "/customers/external/{crmId}", tag = "customers",
    params(("crmId" = String, Path, description = "CRM id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove_by_crm_id(State(state): State<AppState>, Path(crm_id): Path<String>) -> Result<(), JsonApiError> {
    let (cancel, _guard) = request_token();
    if state.dispatcher.send(DeleteCustomerByCrmId { crm_id: crm_id.clone() }, &cancel).await? {
        Ok(())
    } else {
        Err(JsonApiError::not_found(format!("customer '{crm_id}'")))
    }
}
