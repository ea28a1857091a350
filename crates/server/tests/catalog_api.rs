mod support;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use support::{app, call};

#[tokio::test]
async fn product_create_then_fetch() -> anyhow::Result<()> {
    let app = app().await?;
    let created = call(&app, Method::POST, "/products", Some(json!({"id": 77, "sku": "X1", "name": "Widget"}))).await?;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().expect("id");
    assert_ne!(id, 77);
    assert_eq!(created.headers[header::LOCATION], format!("/products/{id}").as_str());

    let fetched = call(&app, Method::GET, &format!("/products/{id}"), None).await?;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);
    Ok(())
}

#[tokio::test]
async fn deleting_unknown_crm_id_is_not_found() -> anyhow::Result<()> {
    let app = app().await?;
    let reply = call(&app, Method::DELETE, "/customers/external/NOPE-1", None).await?;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn offering_update_with_empty_components_clears_them() -> anyhow::Result<()> {
    let app = app().await?;
    let product = call(&app, Method::POST, "/products", Some(json!({"sku": "P1", "name": "Router"}))).await?;
    let product_id = product.body["id"].clone();

    let offering = call(
        &app,
        Method::POST,
        "/offerings",
        Some(json!({
            "name": "Fibre 100",
            "pricePlan": {"monthlyFee": 29.5},
            "components": [{"productId": product_id, "quantity": 1}]
        })),
    )
    .await?;
    assert_eq!(offering.status, StatusCode::CREATED);
    assert_eq!(offering.body["components"][0]["billing"], "oneOff");
    assert_eq!(offering.body["pricePlan"]["currency"], "USD");
    let uri = format!("/offerings/{}", offering.body["id"]);

    let updated = call(&app, Method::PUT, &uri, Some(json!({"name": "Fibre 100", "components": []}))).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["components"], json!([]));

    let fetched = call(&app, Method::GET, &uri, None).await?;
    assert_eq!(fetched.body["components"], json!([]));
    Ok(())
}

#[tokio::test]
async fn offering_with_unknown_product_is_bad_request() -> anyhow::Result<()> {
    let app = app().await?;
    let reply = call(&app, Method::POST, "/offerings", Some(json!({"name": "Ghost", "components": [{"productId": 404}]}))).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Invariant Violation");
    Ok(())
}

#[tokio::test]
async fn soft_deleted_customer_disappears_from_reads() -> anyhow::Result<()> {
    let app = app().await?;
    let created = call(
        &app,
        Method::POST,
        "/customers",
        Some(json!({"crmId": "C-1", "name": "Acme", "type": "business", "billingAddress": {"city": "Oslo"}})),
    )
    .await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["billingAddress"]["city"], "Oslo");
    assert_eq!(created.body["type"], "business");
    let uri = format!("/customers/{}", created.body["id"]);

    assert_eq!(call(&app, Method::DELETE, &uri, None).await?.status, StatusCode::OK);
    assert_eq!(call(&app, Method::GET, &uri, None).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(call(&app, Method::GET, "/customers/external/C-1", None).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(call(&app, Method::DELETE, &uri, None).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(call(&app, Method::GET, "/customers", None).await?.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn duplicate_crm_id_is_rejected() -> anyhow::Result<()> {
    let app = app().await?;
    let body = json!({"crmId": "C-9", "name": "Acme"});
    assert_eq!(call(&app, Method::POST, "/customers", Some(body.clone())).await?.status, StatusCode::CREATED);

    let again = call(&app, Method::POST, "/customers", Some(body)).await?;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert!(again.body["message"].as_str().unwrap_or_default().contains("C-9"));
    Ok(())
}

#[tokio::test]
async fn update_by_crm_id_keeps_the_crm_id() -> anyhow::Result<()> {
    let app = app().await?;
    call(&app, Method::POST, "/customers", Some(json!({"crmId": "C-5", "name": "Old"}))).await?;
    let updated = call(&app, Method::PUT, "/customers/external/C-5", Some(json!({"crmId": "C-6", "name": "New"}))).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["crmId"], "C-5");
    assert_eq!(updated.body["name"], "New");
    Ok(())
}

#[tokio::test]
async fn ticket_lifecycle_with_comments() -> anyhow::Result<()> {
    let app = app().await?;
    let customer = call(&app, Method::POST, "/customers", Some(json!({"crmId": "C-1", "name": "Acme"}))).await?;

    let ticket = call(
        &app,
        Method::POST,
        "/tickets",
        Some(json!({"customerId": customer.body["id"], "title": "No signal", "owner": "ops", "priority": "high"})),
    )
    .await?;
    assert_eq!(ticket.status, StatusCode::CREATED);
    assert_eq!(ticket.body["subject"], "No signal");
    assert_eq!(ticket.body["assignee"], "ops");
    assert_eq!(ticket.body["priority"], "HIGH");
    assert_eq!(ticket.body["status"], "NEW");
    assert_eq!(ticket.body["customerCrmId"], "C-1");
    let ds_id = ticket.body["dsId"].as_str().expect("dsId").to_string();
    assert!(ds_id.starts_with("DS-"));

    let comment = call(
        &app,
        Method::POST,
        &format!("/tickets/external/{ds_id}/comments"),
        Some(json!({"comment": "Engineer booked", "author": "ops"})),
    )
    .await?;
    assert_eq!(comment.status, StatusCode::CREATED);
    assert_eq!(comment.headers[header::LOCATION], format!("/tickets/{}/comments", ticket.body["id"]).as_str());

    let comments = call(&app, Method::GET, &format!("/tickets/{}/comments", ticket.body["id"]), None).await?;
    assert_eq!(comments.body.as_array().map(Vec::len), Some(1));

    let fetched = call(&app, Method::GET, &format!("/tickets/external/{ds_id}"), None).await?;
    assert_eq!(fetched.body["comments"][0]["comment"], "Engineer booked");

    let closed = call(&app, Method::PUT, &format!("/tickets/external/{ds_id}"), Some(json!({"status": "closed"}))).await?;
    assert_eq!(closed.body["status"], "CLOSED");
    assert_eq!(closed.body["subject"], "No signal");

    assert_eq!(call(&app, Method::DELETE, &format!("/tickets/external/{ds_id}"), None).await?.status, StatusCode::OK);
    let after = call(&app, Method::GET, &format!("/tickets/external/{ds_id}/comments"), None).await?;
    assert_eq!(after.status, StatusCode::OK);
    assert_eq!(after.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn ticket_body_with_both_field_names_is_accepted() -> anyhow::Result<()> {
    let app = app().await?;
    let customer = call(&app, Method::POST, "/customers", Some(json!({"crmId": "C-2", "name": "Acme"}))).await?;
    let id = &customer.body["id"];

    let body = json!({
        "requesterId": id, "customerId": id,
        "subject": "Router", "title": "Router down",
        "assignee": "noc", "owner": "ops"
    });
    let ticket = call(&app, Method::POST, "/tickets", Some(body.clone())).await?;
    assert_eq!(ticket.status, StatusCode::CREATED);
    assert_eq!(ticket.body["subject"], "Router down");
    assert_eq!(ticket.body["assignee"], "ops");
    assert!(ticket.body.get("title").is_none());

    let uri = format!("/tickets/{}", ticket.body["id"]);
    let updated = call(&app, Method::PUT, &uri, Some(json!({"subject": "Fixed?", "title": "Router back", "customerId": id}))).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["subject"], "Router back");
    Ok(())
}

#[tokio::test]
async fn customer_by_crm_id_includes_live_tickets() -> anyhow::Result<()> {
    let app = app().await?;
    let customer = call(&app, Method::POST, "/customers", Some(json!({"crmId": "C-3", "name": "Acme"}))).await?;
    let id = &customer.body["id"];
    let kept = call(&app, Method::POST, "/tickets", Some(json!({"requesterId": id, "subject": "Slow"}))).await?;
    let gone = call(&app, Method::POST, "/tickets", Some(json!({"customerCrmId": "C-3", "subject": "Noisy"}))).await?;
    call(&app, Method::DELETE, &format!("/tickets/{}", gone.body["id"]), None).await?;
    call(&app, Method::POST, &format!("/tickets/{}/comments", kept.body["id"]), Some(json!({"comment": "on it"}))).await?;

    let found = call(&app, Method::GET, "/customers/external/C-3", None).await?;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["crmId"], "C-3");
    let tickets = found.body["tickets"].as_array().expect("tickets");
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["id"], kept.body["id"]);
    assert_eq!(tickets[0]["comments"][0]["comment"], "on it");

    // listing and by-id lookups keep the flat shape
    let by_id = call(&app, Method::GET, &format!("/customers/{id}"), None).await?;
    assert!(by_id.body.get("tickets").is_none());
    Ok(())
}

#[tokio::test]
async fn ticket_without_requester_is_bad_request() -> anyhow::Result<()> {
    let app = app().await?;
    let reply = call(&app, Method::POST, "/tickets", Some(json!({"subject": "orphan"}))).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let comment = call(&app, Method::POST, "/tickets/42/comments", Some(json!({"comment": "hi"}))).await?;
    assert_eq!(comment.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn cfs_characteristics_round_trip_in_order() -> anyhow::Result<()> {
    let app = app().await?;
    let created = call(
        &app,
        Method::POST,
        "/cfs",
        Some(json!({
            "name": "Voice",
            "serviceSpecIds": [3],
            "characteristics": [
                {"name": "codec", "valueType": "string", "configurable": true},
                {"name": "lines", "valueType": "int"}
            ]
        })),
    )
    .await?;
    assert_eq!(created.status, StatusCode::CREATED);
    let uri = format!("/cfs/{}", created.body["id"]);
    let fetched = call(&app, Method::GET, &uri, None).await?;
    assert_eq!(fetched.body["characteristics"][0]["name"], "codec");
    assert_eq!(fetched.body["characteristics"][1]["configurable"], false);

    let updated = call(&app, Method::PUT, &uri, Some(json!({"name": "Voice"}))).await?;
    assert_eq!(updated.body["characteristics"], json!([]));
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> anyhow::Result<()> {
    let app = app().await?;
    let reply = call(&app, Method::GET, "/products/abc", None).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    Ok(())
}
