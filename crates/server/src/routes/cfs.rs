use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use service::cfs::*;

use super::{created, request_token};
use crate::auth::AppState;
use crate::errors::JsonApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cfs", get(list).post(create))
        .route("/cfs/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/cfs", tag = "cfs",
    responses((status = 200, description = "Live customer-facing services", body = [crate::openapi::CfsDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CfsView>>, JsonApiError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.dispatcher.query(GetAllCustomerFacingServices, &cancel).await?))
}

#[utoipa::path(
    post, path = "/cfs", tag = "cfs",
    request_body = crate::openapi::CfsDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CfsDoc),
        (status = 400, description = "Invariant Violation", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<CfsInput>) -> Result<Response, JsonApiError> {
    let (cancel, _guard) = request_token();
    let cfs = state.dispatcher.send(CreateCustomerFacingService { cfs: input }, &cancel).await?;
    Ok(created(format!("/cfs/{}", cfs.id), cfs))
}

#[utoipa::path(
    get, path = "/cfs/{id}", tag = "cfs",
    params(("id" = i32, Path, description = "CFS id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CfsDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<CfsView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .query(GetCustomerFacingServiceById { id }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("customer-facing service {id}")))
}

#[utoipa::path(
    put, path = "/cfs/{id}", tag = "cfs",
    params(("id" = i32, Path, description = "CFS id")),
    request_body = crate::openapi::CfsDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CfsDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CfsInput>,
) -> Result<Json<CfsView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .send(UpdateCustomerFacingService { id, cfs: input }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("customer-facing service {id}")))
}

#[utoipa::path(
    delete, path = "/cfs/{id}", tag = "cfs",
    params(("id" = i32, Path, description = "CFS id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<(), JsonApiError> {
    let (cancel, _guard) = request_token();
    if state.dispatcher.send(DeleteCustomerFacingService { id }, &cancel).await? {
        Ok(())
    } else {
        Err(JsonApiError::not_found(format!("customer-facing service {id}")))
    }
}
