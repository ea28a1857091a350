use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderName, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use service::Dispatcher;
use tracing::warn;

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");
pub const ALT_API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Shared by every route: the dispatcher and the expected API key.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, api_key: impl Into<Arc<str>>) -> Self {
        Self { dispatcher, api_key: api_key.into() }
    }
}

/// Reject requests whose `ApiKey` (or `X-API-KEY`) header is not byte-equal to the configured key.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let headers = req.headers();
    let rejection = match headers.get(&API_KEY_HEADER).or_else(|| headers.get(&ALT_API_KEY_HEADER)) {
        Some(key) if key.as_bytes() == state.api_key.as_bytes() => None,
        Some(_) => Some("Invalid API Key"),
        None => Some("API Key was not provided"),
    };
    match rejection {
        None => next.run(req).await,
        Some(reason) => {
            warn!(path = %req.uri().path(), reason, "request rejected by api key check");
            (StatusCode::UNAUTHORIZED, reason).into_response()
        }
    }
}
