use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use service::offerings::*;

use super::{created, request_token};
use crate::auth::AppState;
use crate::errors::JsonApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/offerings", get(list).post(create))
        .route("/offerings/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/offerings", tag = "offerings",
    responses((status = 200, description = "Live offerings", body = [crate::openapi::OfferingDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OfferingView>>, JsonApiError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.dispatcher.query(GetAllProductOfferings, &cancel).await?))
}

#[utoipa::path(
    post, path = "/offerings", tag = "offerings",
    request_body = crate::openapi::OfferingDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::OfferingDoc),
        (status = 400, description = "Invariant Violation", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<OfferingInput>) -> Result<Response, JsonApiError> {
    let (cancel, _guard) = request_token();
    let offering = state.dispatcher.send(CreateProductOffering { offering: input }, &cancel).await?;
    Ok(created(format!("/offerings/{}", offering.id), offering))
}

#[utoipa::path(
    get, path = "/offerings/{id}", tag = "offerings",
    params(("id" = i32, Path, description = "Offering id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::OfferingDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<OfferingView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .query(GetProductOfferingById { id }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("offering {id}")))
}

#[utoipa::path(
    put, path = "/offerings/{id}", tag = "offerings",
    params(("id" = i32, Path, description = "Offering id")),
    request_body = crate::openapi::OfferingDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::OfferingDoc),
        (status = 400, description = "Unknown or repeated component product", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<OfferingInput>,
) -> Result<Json<OfferingView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .send(UpdateProductOffering { id, offering: input }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("offering {id}")))
}

#[utoipa::path(
    delete, path = "/offerings/{id}", tag = "offerings",
    params(("id" = i32, Path, description = "Offering id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<(), JsonApiError> {
    let (cancel, _guard) = request_token();
    if state.dispatcher.send(DeleteProductOffering { id }, &cancel).await? {
        Ok(())
    } else {
        Err(JsonApiError::not_found(format!("offering {id}")))
    }
}
