use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Serialize;
use tokio_util::sync::{CancellationToken, DropGuard};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::auth::{self, AppState};
use crate::openapi::ApiDoc;

pub mod cfs;
pub mod customers;
pub mod offerings;
pub mod products;
pub mod tickets;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Token for one request, cancelled when the handler returns or is dropped.
///
/// Nothing observes the token by then: an abandoned request stops because
/// dropping the handler future drops its open `AuditSession`, which rolls
/// the transaction back.
pub(crate) fn request_token() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

/// `201 Created` with a `Location` header.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

/// Build the application router. Catalog routes and `/health` require the API key;
/// the OpenAPI document is public and only mounted when `enable_docs` is set.
pub fn build_router(state: AppState, cors: CorsLayer, enable_docs: bool) -> Router {
    let catalog = Router::new()
        .route("/health", get(health))
        .merge(customers::router())
        .merge(products::router())
        .merge(offerings::router())
        .merge(cfs::router())
        .merge(tickets::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key))
        .with_state(state);

    let mut app = Router::new().merge(catalog);
    if enable_docs {
        app = app.route("/api-docs/openapi.json", get(openapi_json));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
