use std::collections::HashMap;

use chrono::Utc;
use models::{customer, ticket, ticket_comment, SoftDeletable};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::customers::find_live_by_crm_id;
use crate::errors::ServiceError;

pub const TICKET_PREFIX: &str = "DS";
pub const COMMENT_PREFIX: &str = "DSC";

/// Tracking id of the form `<prefix>-<yyyyMMddHHmmssfff>-<8 hex>`.
pub fn generate_ds_id(prefix: &str) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{stamp}-{}", &suffix[..8])
}

/// How a caller names a ticket: store id, tracking id, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketKey {
    pub id: Option<i32>,
    pub ds_id: Option<String>,
}

impl TicketKey {
    pub fn id(id: i32) -> Self {
        Self { id: Some(id), ds_id: None }
    }

    pub fn ds_id(ds_id: impl Into<String>) -> Self {
        Self { id: None, ds_id: Some(ds_id.into()) }
    }

    /// Live ticket by id when one is given, otherwise (or when that misses) by `dsId`.
    pub(crate) async fn resolve<C: ConnectionTrait>(&self, conn: &C) -> Result<Option<ticket::Model>, ServiceError> {
        if let Some(id) = self.id.filter(|id| *id > 0) {
            if let Some(found) = ticket::Entity::find_live_by_id(id).one(conn).await? {
                return Ok(Some(found));
            }
        }
        match self.ds_id.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(ds_id) => find_live_by_ds_id(conn, ds_id).await,
            None => Ok(None),
        }
    }
}

impl std::fmt::Display for TicketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.id, self.ds_id.as_deref()) {
            (Some(id), Some(ds_id)) => write!(f, "{id} / '{ds_id}'"),
            (Some(id), None) => write!(f, "{id}"),
            (None, Some(ds_id)) => write!(f, "'{ds_id}'"),
            (None, None) => f.write_str("<none>"),
        }
    }
}

/// Ticket fields. Absent fields keep their stored value on update and take
/// defaults on create.
///
/// The UI names `customerId`, `title` and `owner` may be sent alongside
/// `requesterId`, `subject` and `assignee`; when both are present the UI
/// name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketInput {
    pub ds_id: Option<String>,
    pub requester_id: Option<i32>,
    #[serde(skip_serializing)]
    pub customer_id: Option<i32>,
    pub customer_crm_id: Option<String>,
    pub subject: Option<String>,
    #[serde(skip_serializing)]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub submitter: Option<String>,
    pub assignee: Option<String>,
    #[serde(skip_serializing)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentInput {
    pub ds_id: Option<String>,
    pub comment: String,
    pub author: String,
}

pub type CommentView = ticket_comment::Model;

/// Ticket with its live comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: i32,
    pub ds_id: String,
    pub requester_id: i32,
    pub customer_crm_id: String,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub submitter: String,
    pub assignee: String,
    pub comments: Vec<CommentView>,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

impl TicketView {
    pub(crate) fn new(t: ticket::Model, comments: Vec<CommentView>) -> Self {
        Self {
            id: t.id,
            ds_id: t.ds_id,
            requester_id: t.requester_id,
            customer_crm_id: t.customer_crm_id,
            subject: t.subject,
            description: t.description,
            status: t.status,
            priority: t.priority,
            submitter: t.submitter,
            assignee: t.assignee,
            comments,
            created_at: t.created_at,
            last_modified: t.last_modified,
            is_deleted: t.is_deleted,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TicketInput {
    /// Caller's tracking id, or a fresh one.
    pub(crate) fn ds_id_or_generate(&self) -> String {
        non_blank(&self.ds_id).map_or_else(|| generate_ds_id(TICKET_PREFIX), str::to_string)
    }

    /// Requester store id, `customerId` before `requesterId`.
    pub fn requester(&self) -> Option<i32> {
        self.customer_id.or(self.requester_id)
    }

    pub fn subject(&self) -> Option<&String> {
        self.title.as_ref().or(self.subject.as_ref())
    }

    pub fn assignee(&self) -> Option<&String> {
        self.owner.as_ref().or(self.assignee.as_ref())
    }

    /// Requester by store id when positive, otherwise by `customerCrmId`.
    pub(crate) async fn resolve_requester<C: ConnectionTrait>(&self, conn: &C) -> Result<customer::Model, ServiceError> {
        if let Some(id) = self.requester().filter(|id| *id > 0) {
            return live_customer(conn, id).await;
        }
        if let Some(crm_id) = non_blank(&self.customer_crm_id) {
            return find_live_by_crm_id(conn, crm_id)
                .await?
                .ok_or_else(|| ServiceError::invariant(format!("customer with crmId '{crm_id}' not found")));
        }
        Err(ServiceError::invariant("either requesterId or customerCrmId must be provided"))
    }

    /// Overwrite the fields present in this input. Status and priority are normalised.
    pub(crate) fn apply(&self, am: &mut ticket::ActiveModel) -> Result<(), ServiceError> {
        if let Some(crm_id) = &self.customer_crm_id {
            am.customer_crm_id = Set(crm_id.clone());
        }
        if let Some(subject) = self.subject() {
            am.subject = Set(subject.clone());
        }
        if let Some(description) = &self.description {
            am.description = Set(description.clone());
        }
        if let Some(status) = &self.status {
            am.status = Set(ticket::normalize_status(status)?);
        }
        if let Some(priority) = &self.priority {
            am.priority = Set(ticket::normalize_priority(priority)?);
        }
        if let Some(submitter) = &self.submitter {
            am.submitter = Set(submitter.clone());
        }
        if let Some(assignee) = self.assignee() {
            am.assignee = Set(assignee.clone());
        }
        Ok(())
    }
}

impl CommentInput {
    pub(crate) fn ds_id_or_generate(&self) -> String {
        non_blank(&self.ds_id).map_or_else(|| generate_ds_id(COMMENT_PREFIX), str::to_string)
    }
}

pub(crate) async fn live_customer<C: ConnectionTrait>(conn: &C, id: i32) -> Result<customer::Model, ServiceError> {
    customer::Entity::find_live_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::invariant(format!("customer {id} not found")))
}

pub(crate) async fn find_live_by_ds_id<C: ConnectionTrait>(conn: &C, ds_id: &str) -> Result<Option<ticket::Model>, ServiceError> {
    Ok(ticket::Entity::find_live().filter(ticket::Column::DsId.eq(ds_id)).one(conn).await?)
}

pub(crate) async fn ensure_ticket_ds_id_free<C: ConnectionTrait>(conn: &C, ds_id: &str) -> Result<(), ServiceError> {
    if find_live_by_ds_id(conn, ds_id).await?.is_some() {
        return Err(ServiceError::invariant(format!("ticket dsId '{ds_id}' already exists")));
    }
    Ok(())
}

pub(crate) async fn ensure_comment_ds_id_free<C: ConnectionTrait>(conn: &C, ds_id: &str) -> Result<(), ServiceError> {
    let taken = ticket_comment::Entity::find_live()
        .filter(ticket_comment::Column::DsId.eq(ds_id))
        .one(conn)
        .await?;
    if taken.is_some() {
        return Err(ServiceError::invariant(format!("comment dsId '{ds_id}' already exists")));
    }
    Ok(())
}

/// Live comments of the given tickets, oldest first.
pub(crate) async fn load_comments<C: ConnectionTrait>(conn: &C, ticket_ids: &[i32]) -> Result<Vec<CommentView>, ServiceError> {
    if ticket_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(ticket_comment::Entity::find_live()
        .filter(ticket_comment::Column::TicketId.is_in(ticket_ids.iter().copied()))
        .order_by_asc(ticket_comment::Column::Id)
        .all(conn)
        .await?)
}

/// Attach live comments to each ticket, keeping the ticket order.
pub(crate) async fn with_comments<C: ConnectionTrait>(
    conn: &C,
    tickets: Vec<ticket::Model>,
) -> Result<Vec<TicketView>, ServiceError> {
    let ids: Vec<i32> = tickets.iter().map(|t| t.id).collect();
    let mut by_ticket: HashMap<i32, Vec<CommentView>> = HashMap::new();
    for c in load_comments(conn, &ids).await? {
        by_ticket.entry(c.ticket_id).or_default().push(c);
    }
    Ok(tickets
        .into_iter()
        .map(|t| {
            let comments = by_ticket.remove(&t.id).unwrap_or_default();
            TicketView::new(t, comments)
        })
        .collect())
}

/// Live tickets raised by one customer, oldest first.
pub(crate) async fn requested_by<C: ConnectionTrait>(conn: &C, customer_id: i32) -> Result<Vec<TicketView>, ServiceError> {
    let tickets = ticket::Entity::find_live()
        .filter(ticket::Column::RequesterId.eq(customer_id))
        .order_by_asc(ticket::Column::Id)
        .all(conn)
        .await?;
    with_comments(conn, tickets).await
}
