use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::db::{connect_with_config, ping, DatabaseConfig};

#[tokio::test]
async fn sqlite_memory_connection_answers_queries() -> Result<()> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    ping(&db).await?;

    let row = db
        .query_one(Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 AS test".to_string()))
        .await?
        .expect("one row");
    let value: i32 = row.try_get("", "test")?;
    assert_eq!(value, 1);
    Ok(())
}

#[test]
fn settings_conversion_pins_memory_pool() {
    let mut settings = configs::DatabaseConfig::defaults();
    settings.url = "sqlite::memory:".into();
    settings.max_connections = 8;
    let cfg = DatabaseConfig::from(&settings);
    assert_eq!(cfg.max_connections, 1);
    assert_eq!(cfg.min_connections, 1);
    assert!(cfg.idle_timeout.is_none());
}

#[test]
fn settings_conversion_keeps_pool_bounds() {
    let mut settings = configs::DatabaseConfig::defaults();
    settings.url = "postgres://localhost/catalog".into();
    settings.max_connections = 12;
    settings.acquire_timeout_secs = 7;
    let cfg = DatabaseConfig::from(&settings);
    assert_eq!(cfg.max_connections, 12);
    assert_eq!(cfg.acquire_timeout, Duration::from_secs(7));
    assert_eq!(cfg.max_lifetime, Some(Duration::from_secs(3600)));
}

#[tokio::test]
async fn migrations_create_every_table() -> Result<()> {
    let db = super::setup_test_db().await?;
    for table in [
        "customer",
        "product",
        "product_offering",
        "product_offering_component",
        "customer_facing_service",
        "cfs_characteristic",
        "ticket",
        "ticket_comment",
    ] {
        let sql = format!("SELECT name FROM sqlite_master WHERE type = 'table' AND name = '{table}'");
        let found = db.query_one(Statement::from_string(DatabaseBackend::Sqlite, sql)).await?;
        assert!(found.is_some(), "missing table {table}");
    }
    Ok(())
}
