use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use service::products::*;

use super::{created, request_token};
use crate::auth::AppState;
use crate::errors::JsonApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses((status = 200, description = "Live products", body = [crate::openapi::ProductDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.dispatcher.query(GetAllProducts, &cancel).await?))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invariant Violation", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<ProductInput>) -> Result<Response, JsonApiError> {
    let (cancel, _guard) = request_token();
    let product = state.dispatcher.send(CreateProduct { product: input }, &cancel).await?;
    Ok(created(format!("/products/{}", product.id), product))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ProductView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .query(GetProductById { id }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("product {id}")))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::ProductDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    state
        .dispatcher
        .send(UpdateProduct { id, product: input }, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("product {id}")))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<(), JsonApiError> {
    let (cancel, _guard) = request_token();
    if state.dispatcher.send(DeleteProduct { id }, &cancel).await? {
        Ok(())
    } else {
        Err(JsonApiError::not_found(format!("product {id}")))
    }
}
