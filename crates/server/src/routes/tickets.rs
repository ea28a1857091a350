use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use service::tickets::*;

use super::{created, request_token};
use crate::auth::AppState;
use crate::errors::JsonApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tickets", get(list).post(create))
        .route("/tickets/:id", get(get_one).put(update).delete(remove))
        .route(
            "/tickets/external/:ds_id",
            get(get_by_ds_id).put(update_by_ds_id).delete(remove_by_ds_id),
        )
        .route("/tickets/:id/comments", get(comments).post(add_comment))
        .route("/tickets/external/:ds_id/comments", get(comments_by_ds_id).post(add_comment_by_ds_id))
}

async fn fetch(state: &AppState, key: TicketKey) -> Result<Json<TicketView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    let what = format!("ticket {key}");
    state.dispatcher.query(GetTicket { key }, &cancel).await?.map(Json).ok_or_else(|| JsonApiError::not_found(what))
}

async fn patch(state: &AppState, key: TicketKey, input: TicketInput) -> Result<Json<TicketView>, JsonApiError> {
    let (cancel, _guard) = request_token();
    let what = format!("ticket {key}");
    let updated = state.dispatcher.send(UpdateTicket { key, ticket: input }, &cancel).await?;
    updated.map(Json).ok_or_else(|| JsonApiError::not_found(what))
}

async fn delete_ticket(state: &AppState, key: TicketKey) -> Result<(), JsonApiError> {
    let (cancel, _guard) = request_token();
    let what = format!("ticket {key}");
    if state.dispatcher.send(DeleteTicket { key }, &cancel).await? {
        Ok(())
    } else {
        Err(JsonApiError::not_found(what))
    }
}

async fn comment_on(state: &AppState, key: TicketKey, input: CommentInput) -> Result<Response, JsonApiError> {
    let (cancel, _guard) = request_token();
    let comment = state.dispatcher.send(CreateTicketComment { ticket: key, comment: input }, &cancel).await?;
    Ok(created(format!("/tickets/{}/comments", comment.ticket_id), comment))
}

async fn list_comments(state: &AppState, key: TicketKey) -> Result<Json<Vec<CommentView>>, JsonApiError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.dispatcher.query(GetCommentsByTicket { ticket: key }, &cancel).await?))
}

#[utoipa::path(
    get, path = "/tickets", tag = "tickets",
    responses((status = 200, description = "Live tickets with their comments", body = [crate::openapi::TicketDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TicketView>>, JsonApiError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.dispatcher.query(GetAllTickets, &cancel).await?))
}

#[utoipa::path(
    post, path = "/tickets", tag = "tickets",
    request_body = crate::openapi::TicketInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TicketDoc),
        (status = 400, description = "Requester unresolved, duplicate dsId or bad status", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<TicketInput>) -> Result<Response, JsonApiError> {
    let (cancel, _guard) = request_token();
    let ticket = state.dispatcher.send(CreateTicket { ticket: input }, &cancel).await?;
    Ok(created(format!("/tickets/{}", ticket.id), ticket))
}

#[utoipa::path(
    get, path = "/tickets/{id}", tag = "tickets",
    params(("id" = i32, Path, description = "Ticket id")),
    responses((status = 200, description = "Found", body = crate::openapi::TicketDoc), (status = 404, description = "Not Found"))
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<TicketView>, JsonApiError> {
    fetch(&state, TicketKey::id(id)).await
}

#[utoipa::path(
    get, path = "/tickets/external/{dsId}", tag = "tickets",
    params(("dsId" = String, Path, description = "Tracking id")),
    responses((status = 200, description = "Found", body = crate::openapi::TicketDoc), (status = 404, description = "Not Found"))
)]
pub async fn get_by_ds_id(State(state): State<AppState>, Path(ds_id): Path<String>) -> Result<Json<TicketView>, JsonApiError> {
    fetch(&state, TicketKey::ds_id(ds_id)).await
}

/// Falls back to the body's `dsId` when no live ticket has this id.
#[utoipa::path(
    put, path = "/tickets/{id}", tag = "tickets",
    params(("id" = i32, Path, description = "Ticket id")),
    request_body = crate::openapi::TicketInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TicketDoc),
        (status = 400, description = "Unknown requester or bad status", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<TicketInput>,
) -> Result<Json<TicketView>, JsonApiError> {
    let key = TicketKey { id: Some(id), ds_id: input.ds_id.clone() };
    patch(&state, key, input).await
}

#[utoipa::path(
    put, path = "/tickets/external/{dsId}", tag = "tickets",
    params(("dsId" = String, Path, description = "Tracking id")),
    request_body = crate::openapi::TicketInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TicketDoc),
        (status = 400, description = "Unknown requester or bad status", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_by_ds_id(
    State(state): State<AppState>,
    Path(ds_id): Path<String>,
    Json(input): Json<TicketInput>,
) -> Result<Json<TicketView>, JsonApiError> {
    patch(&state, TicketKey::ds_id(ds_id), input).await
}

#[utoipa::path(
    delete, path = "/tickets/{id}", tag = "tickets",
    params(("id" = i32, Path, description = "Ticket id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<(), JsonApiError> {
    delete_ticket(&state, TicketKey::id(id)).await
}

#[utoipa::path(
    delete, path = "/tickets/external/{dsId}", tag = "tickets",
    params(("dsId" = String, Path, description = "Tracking id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove_by_ds_id(State(state): State<AppState>, Path(ds_id): Path<String>) -> Result<(), JsonApiError> {
    delete_ticket(&state, TicketKey::ds_id(ds_id)).await
}

#[utoipa::path(
    get, path = "/tickets/{id}/comments", tag = "tickets",
    params(("id" = i32, Path, description = "Ticket id")),
    responses((status = 200, description = "Live comments; empty for an unknown ticket", body = [crate::openapi::CommentDoc]))
)]
pub async fn comments(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<CommentView>>, JsonApiError> {
    list_comments(&state, TicketKey::id(id)).await
}

#[utoipa::path(
    get, path = "/tickets/external/{dsId}/comments", tag = "tickets",
    params(("dsId" = String, Path, description = "Tracking id")),
    responses((status = 200, description = "Live comments; empty for an unknown ticket", body = [crate::openapi::CommentDoc]))
)]
pub async fn comments_by_ds_id(
    State(state): State<AppState>,
    Path(ds_id): Path<String>,
) -> Result<Json<Vec<CommentView>>, JsonApiError> {
    list_comments(&state, TicketKey::ds_id(ds_id)).await
}

#[utoipa::path(
    post, path = "/tickets/{id}/comments", tag = "tickets",
    params(("id" = i32, Path, description = "Ticket id")),
    request_body = crate::openapi::CommentInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CommentDoc),
        (status = 400, description = "Unknown ticket or duplicate dsId", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CommentInput>,
) -> Result<Response, JsonApiError> {
    comment_on(&state, TicketKey::id(id), input).await
}

#[utoipa::path(
    post, path = "/tickets/external/{dsId}/comments", tag = "tickets",
    params(("dsId" = String, Path, description = "Tracking id")),
    request_body = crate::openapi::CommentInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CommentDoc),
        (status = 400, description = "Unknown ticket or duplicate dsId", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn add_comment_by_ds_id(
    State(state): State<AppState>,
    Path(ds_id): Path<String>,
    Json(input): Json<CommentInput>,
) -> Result<Response, JsonApiError> {
    comment_on(&state, TicketKey::ds_id(ds_id), input).await
}
