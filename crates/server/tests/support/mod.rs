#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use serde_json::Value;
use tower::ServiceExt;

pub const KEY: &str = "test-key-123";

pub fn config(enable_docs: bool) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.auth.api_key = KEY.into();
    cfg.server.enable_docs = enable_docs;
    cfg
}

/// Router over a fresh in-memory database with the schema applied.
pub async fn app() -> anyhow::Result<Router> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(server::build_app(db, &config(true))?)
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<Reply> {
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok(Reply { status, headers, body })
}

/// Request carrying the API key.
pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<Reply> {
    let builder = Request::builder().method(method).uri(uri).header("ApiKey", KEY);
    let req = match body {
        Some(json) => builder.header("content-type", "application/json").body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    send(app, req).await
}
