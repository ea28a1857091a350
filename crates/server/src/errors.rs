use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error response with a `{"error": title, "message": detail}` body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, message: Option<String>) -> Self {
        Self { status, title, message }
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("{what} not found")))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.title, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Invariant(msg) => {
                warn!(error = %msg, "request rejected");
                Self::new(StatusCode::BAD_REQUEST, "Invariant Violation", Some(msg))
            }
            ServiceError::Cancelled => Self::new(StatusCode::REQUEST_TIMEOUT, "Request Cancelled", None),
            ServiceError::Db(msg) => {
                error!(error = %msg, "database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", Some(msg))
            }
            ServiceError::Dispatch(e) => {
                error!(error = %e, "dispatch failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Dispatch Error", Some(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migrations failed: {0}")]
    Migration(String),
    #[error("handler registry invalid: {0}")]
    Registry(#[from] service::DispatchError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::invariant("dup"), StatusCode::BAD_REQUEST),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Cancelled, StatusCode::REQUEST_TIMEOUT),
            (ServiceError::Dispatch(service::DispatchError::MissingHandler("X")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn invariant_message_is_carried() {
        let e = JsonApiError::from(ServiceError::invariant("crmId 'C1' already exists"));
        assert_eq!(e.title, "Invariant Violation");
        assert_eq!(e.message.as_deref(), Some("crmId 'C1' already exists"));
    }
}
