use async_trait::async_trait;
use models::{customer, SoftDeletable};
use sea_orm::EntityTrait;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::domain::{ensure_crm_id_free, find_live_by_crm_id, CustomerInput, CustomerView};
use crate::cqrs::{db_handlers, Command, CommandHandler};
use crate::errors::ServiceError;
use crate::persistence::AuditSession;

#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub customer: CustomerInput,
}

impl Command for CreateCustomer {
    type Output = CustomerView;
}

/// Full update by store id, `crmId` included.
#[derive(Debug, Clone)]
pub struct UpdateCustomer {
    pub id: i32,
    pub customer: CustomerInput,
}

impl Command for UpdateCustomer {
    type Output = Option<CustomerView>;
}

/// Full update addressed by CRM id; the stored `crmId` never changes.
#[derive(Debug, Clone)]
pub struct UpdateCustomerByCrmId {
    pub crm_id: String,
    pub customer: CustomerInput,
}

impl Command for UpdateCustomerByCrmId {
    type Output = Option<CustomerView>;
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteCustomer {
    pub id: i32,
}

impl Command for DeleteCustomer {
    type Output = bool;
}

#[derive(Debug, Clone)]
pub struct DeleteCustomerByCrmId {
    pub crm_id: String,
}

impl Command for DeleteCustomerByCrmId {
    type Output = bool;
}

db_handlers!(
    CreateCustomerHandler,
    UpdateCustomerHandler,
    UpdateCustomerByCrmIdHandler,
    DeleteCustomerHandler,
    DeleteCustomerByCrmIdHandler,
);

#[async_trait]
impl CommandHandler<CreateCustomer> for CreateCustomerHandler {
    #[instrument(skip(self, command, cancel), fields(crm_id = %command.customer.crm_id))]
    async fn handle(&self, command: CreateCustomer, cancel: &CancellationToken) -> Result<CustomerView, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        ensure_crm_id_free(session.conn(), &command.customer.crm_id, None).await?;

        let mut am = customer::ActiveModel::default();
        command.customer.apply(&mut am, true);
        let created = session.add(am).await?;
        session.commit(cancel).await?;

        info!(id = created.id, crm_id = %created.crm_id, "customer created");
        Ok(created.into())
    }
}

#[async_trait]
impl CommandHandler<UpdateCustomer> for UpdateCustomerHandler {
    #[instrument(skip(self, command, cancel), fields(id = command.id))]
    async fn handle(&self, command: UpdateCustomer, cancel: &CancellationToken) -> Result<Option<CustomerView>, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = customer::Entity::find_live_by_id(command.id).one(session.conn()).await? else {
            return Ok(None);
        };
        ensure_crm_id_free(session.conn(), &command.customer.crm_id, Some(existing.id)).await?;

        let mut am: customer::ActiveModel = existing.into();
        command.customer.apply(&mut am, true);
        let updated = session.modify(am).await?;
        session.commit(cancel).await?;

        info!(id = updated.id, "customer updated");
        Ok(Some(updated.into()))
    }
}

#[async_trait]
impl CommandHandler<UpdateCustomerByCrmId> for UpdateCustomerByCrmIdHandler {
    #[instrument(skip(self, command, cancel), fields(crm_id = %command.crm_id))]
    async fn handle(
        &self,
        command: UpdateCustomerByCrmId,
        cancel: &CancellationToken,
    ) -> Result<Option<CustomerView>, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = find_live_by_crm_id(session.conn(), &command.crm_id).await? else {
            return Ok(None);
        };

        let mut am: customer::ActiveModel = existing.into();
        command.customer.apply(&mut am, false);
        let updated = session.modify(am).await?;
        session.commit(cancel).await?;

        info!(id = updated.id, crm_id = %updated.crm_id, "customer updated");
        Ok(Some(updated.into()))
    }
}

#[async_trait]
impl CommandHandler<DeleteCustomer> for DeleteCustomerHandler {
    #[instrument(skip(self, cancel))]
    async fn handle(&self, command: DeleteCustomer, cancel: &CancellationToken) -> Result<bool, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = customer::Entity::find_live_by_id(command.id).one(session.conn()).await? else {
            return Ok(false);
        };
        session.remove(customer::ActiveModel::from(existing)).await?;
        session.commit(cancel).await?;

        info!(id = command.id, "customer deleted");
        Ok(true)
    }
}

#[async_trait]
impl CommandHandler<DeleteCustomerByCrmId> for DeleteCustomerByCrmIdHandler {
    #[instrument(skip(self, command, cancel), fields(crm_id = %command.crm_id))]
    async fn handle(&self, command: DeleteCustomerByCrmId, cancel: &CancellationToken) -> Result<bool, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = find_live_by_crm_id(session.conn(), &command.crm_id).await? else {
            return Ok(false);
        };
        let id = existing.id;
        session.remove(customer::ActiveModel::from(existing)).await?;
        session.commit(cancel).await?;

        info!(id, crm_id = %command.crm_id, "customer deleted");
        Ok(true)
    }
}
