use async_trait::async_trait;
use models::ticket;
use sea_orm::Set;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::domain::{ensure_ticket_ds_id_free, live_customer, load_comments, TicketInput, TicketKey, TicketView};
use crate::cqrs::{db_handlers, Command, CommandHandler};
use crate::errors::ServiceError;
use crate::persistence::AuditSession;

#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub ticket: TicketInput,
}

impl Command for CreateTicket {
    type Output = TicketView;
}

/// Partial update; only the fields present in `ticket` change. The stored `dsId` is kept.
#[derive(Debug, Clone)]
pub struct UpdateTicket {
    pub key: TicketKey,
    pub ticket: TicketInput,
}

impl Command for UpdateTicket {
    type Output = Option<TicketView>;
}

#[derive(Debug, Clone)]
pub struct DeleteTicket {
    pub key: TicketKey,
}

impl Command for DeleteTicket {
    type Output = bool;
}

db_handlers!(CreateTicketHandler, UpdateTicketHandler, DeleteTicketHandler);

#[async_trait]
impl CommandHandler<CreateTicket> for CreateTicketHandler {
    #[instrument(skip(self, command, cancel), fields(requester_id = ?command.ticket.requester()))]
    async fn handle(&self, command: CreateTicket, cancel: &CancellationToken) -> Result<TicketView, ServiceError> {
        let input = command.ticket;
        let session = AuditSession::begin(&self.db).await?;
        let requester = input.resolve_requester(session.conn()).await?;
        let ds_id = input.ds_id_or_generate();
        ensure_ticket_ds_id_free(session.conn(), &ds_id).await?;

        let mut am = ticket::ActiveModel {
            ds_id: Set(ds_id),
            requester_id: Set(requester.id),
            subject: Set(String::new()),
            description: Set(String::new()),
            status: Set(ticket::DEFAULT_STATUS.to_string()),
            priority: Set(ticket::DEFAULT_PRIORITY.to_string()),
            submitter: Set(String::new()),
            assignee: Set(String::new()),
            ..Default::default()
        };
        input.apply(&mut am)?;
        let crm_id = input.customer_crm_id.filter(|c| !c.trim().is_empty()).unwrap_or(requester.crm_id);
        am.customer_crm_id = Set(crm_id);

        let created = session.add(am).await?;
        session.commit(cancel).await?;

        info!(id = created.id, ds_id = %created.ds_id, "ticket created");
        Ok(TicketView::new(created, Vec::new()))
    }
}

#[async_trait]
impl CommandHandler<UpdateTicket> for UpdateTicketHandler {
    #[instrument(skip(self, command, cancel), fields(id = ?command.key.id, ds_id = ?command.key.ds_id))]
    async fn handle(&self, command: UpdateTicket, cancel: &CancellationToken) -> Result<Option<TicketView>, ServiceError> {
        let input = command.ticket;
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = command.key.resolve(session.conn()).await? else {
            return Ok(None);
        };

        let mut am: ticket::ActiveModel = existing.into();
        if let Some(requester_id) = input.requester() {
            let requester = live_customer(session.conn(), requester_id).await?;
            am.requester_id = Set(requester.id);
        }
        input.apply(&mut am)?;
        let updated = session.modify(am).await?;
        let comments = load_comments(session.conn(), &[updated.id]).await?;
        session.commit(cancel).await?;

        info!(id = updated.id, ds_id = %updated.ds_id, "ticket updated");
        Ok(Some(TicketView::new(updated, comments)))
    }
}

#[async_trait]
impl CommandHandler<DeleteTicket> for DeleteTicketHandler {
    #[instrument(skip(self, cancel))]
    async fn handle(&self, command: DeleteTicket, cancel: &CancellationToken) -> Result<bool, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = command.key.resolve(session.conn()).await? else {
            return Ok(false);
        };
        let (id, ds_id) = (existing.id, existing.ds_id.clone());
        session.remove(ticket::ActiveModel::from(existing)).await?;
        session.commit(cancel).await?;

        info!(id, %ds_id, "ticket deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cqrs::QueryHandler;
    use crate::customers::{CreateCustomer, CreateCustomerHandler, CustomerInput};
    use crate::tickets::{GetAllTickets, GetAllTicketsHandler};
    use crate::test_support::get_db;
    use sea_orm::DatabaseConnection;

    async fn customer(db: &DatabaseConnection, crm_id: &str) -> anyhow::Result<i32> {
        let c = CreateCustomerHandler::new(db.clone())
            .handle(
                CreateCustomer { customer: CustomerInput { crm_id: crm_id.into(), name: "Acme".into(), ..Default::default() } },
                &CancellationToken::new(),
            )
            .await?;
        Ok(c.id)
    }

    fn ticket_for(requester_id: i32) -> TicketInput {
        TicketInput { requester_id: Some(requester_id), subject: Some("No dial tone".into()), ..Default::default() }
    }

    #[tokio::test]
    async fn create_applies_defaults_and_generates_ds_id() -> anyhow::Result<()> {
        let db = get_db().await?;
        let requester = customer(&db, "CRM-1").await?;
        let created = CreateTicketHandler::new(db.clone())
            .handle(CreateTicket { ticket: ticket_for(requester) }, &CancellationToken::new())
            .await?;

        assert!(created.ds_id.starts_with("DS-"));
        assert_eq!(created.status, "NEW");
        assert_eq!(created.priority, "LOW");
        assert_eq!(created.requester_id, requester);
        assert_eq!(created.customer_crm_id, "CRM-1");
        assert!(created.comments.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_resolves_requester_by_crm_id() -> anyhow::Result<()> {
        let db = get_db().await?;
        let requester = customer(&db, "CRM-7").await?;
        let input = TicketInput { customer_crm_id: Some("CRM-7".into()), status: Some("open".into()), ..Default::default() };
        let created = CreateTicketHandler::new(db.clone())
            .handle(CreateTicket { ticket: input }, &CancellationToken::new())
            .await?;
        assert_eq!(created.requester_id, requester);
        assert_eq!(created.status, "OPEN");
        Ok(())
    }

    #[tokio::test]
    async fn create_without_resolvable_requester_fails() -> anyhow::Result<()> {
        let db = get_db().await?;
        let create = CreateTicketHandler::new(db.clone());
        let cancel = CancellationToken::new();

        let none = create.handle(CreateTicket { ticket: TicketInput::default() }, &cancel).await;
        assert!(matches!(none, Err(ServiceError::Invariant(_))));
        let unknown = create.handle(CreateTicket { ticket: ticket_for(404) }, &cancel).await;
        assert!(matches!(unknown, Err(ServiceError::Invariant(_))));
        let crm = TicketInput { customer_crm_id: Some("nobody".into()), ..Default::default() };
        assert!(matches!(create.handle(CreateTicket { ticket: crm }, &cancel).await, Err(ServiceError::Invariant(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_ds_id_is_rejected_and_store_unchanged() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let requester = customer(&db, "CRM-1").await?;
        let create = CreateTicketHandler::new(db.clone());
        let first = TicketInput { ds_id: Some("DS-100".into()), ..ticket_for(requester) };
        create.handle(CreateTicket { ticket: first.clone() }, &cancel).await?;

        let again = create.handle(CreateTicket { ticket: first }, &cancel).await;
        assert!(matches!(again, Err(ServiceError::Invariant(_))));
        assert_eq!(GetAllTicketsHandler::new(db.clone()).handle(GetAllTickets, &cancel).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn deleted_ds_id_can_be_reused() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let requester = customer(&db, "CRM-1").await?;
        let create = CreateTicketHandler::new(db.clone());
        let input = TicketInput { ds_id: Some("DS-7".into()), ..ticket_for(requester) };
        create.handle(CreateTicket { ticket: input.clone() }, &cancel).await?;
        assert!(DeleteTicketHandler::new(db.clone()).handle(DeleteTicket { key: TicketKey::ds_id("DS-7") }, &cancel).await?);

        let reborn = create.handle(CreateTicket { ticket: input }, &cancel).await?;
        assert_eq!(reborn.ds_id, "DS-7");
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_only_present_fields() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let requester = customer(&db, "CRM-1").await?;
        let created = CreateTicketHandler::new(db.clone())
            .handle(
                CreateTicket { ticket: TicketInput { description: Some("line 2".into()), ..ticket_for(requester) } },
                &cancel,
            )
            .await?;

        let patch = TicketInput { priority: Some("urgent".into()), assignee: Some("ops".into()), ..Default::default() };
        let updated = UpdateTicketHandler::new(db.clone())
            .handle(UpdateTicket { key: TicketKey::ds_id(created.ds_id.clone()), ticket: patch }, &cancel)
            .await?
            .expect("ticket");
        assert_eq!(updated.priority, "URGENT");
        assert_eq!(updated.assignee, "ops");
        assert_eq!(updated.subject, "No dial tone");
        assert_eq!(updated.description, "line 2");
        assert_eq!(updated.ds_id, created.ds_id);
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_unknown_requester_and_bad_status() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let requester = customer(&db, "CRM-1").await?;
        let created = CreateTicketHandler::new(db.clone()).handle(CreateTicket { ticket: ticket_for(requester) }, &cancel).await?;
        let update = UpdateTicketHandler::new(db.clone());

        let moved = update
            .handle(UpdateTicket { key: TicketKey::id(created.id), ticket: TicketInput { requester_id: Some(99), ..Default::default() } }, &cancel)
            .await;
        assert!(matches!(moved, Err(ServiceError::Invariant(_))));
        let bad = update
            .handle(UpdateTicket { key: TicketKey::id(created.id), ticket: TicketInput { status: Some("escalated".into()), ..Default::default() } }, &cancel)
            .await;
        assert!(matches!(bad, Err(ServiceError::Invariant(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_accepts_ui_and_stored_names_together() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let first = customer(&db, "CRM-1").await?;
        let second = customer(&db, "CRM-2").await?;
        let created = CreateTicketHandler::new(db.clone()).handle(CreateTicket { ticket: ticket_for(first) }, &cancel).await?;

        let patch: TicketInput = serde_json::from_value(serde_json::json!({
            "requesterId": first, "customerId": second,
            "subject": "No dial tone", "title": "Line dead",
            "assignee": "noc", "owner": "field team"
        }))?;
        let updated = UpdateTicketHandler::new(db.clone())
            .handle(UpdateTicket { key: TicketKey::id(created.id), ticket: patch }, &cancel)
            .await?
            .expect("ticket");
        assert_eq!(updated.requester_id, second);
        assert_eq!(updated.subject, "Line dead");
        assert_eq!(updated.assignee, "field team");
        Ok(())
    }
}
