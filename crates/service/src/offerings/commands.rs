use async_trait::async_trait;
use models::{product_offering, product_offering_component, SoftDeletable};
use sea_orm::EntityTrait;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::domain::{load_components, validate_components, OfferingInput, OfferingView};
use crate::cqrs::{db_handlers, Command, CommandHandler};
use crate::errors::ServiceError;
use crate::persistence::AuditSession;

#[derive(Debug, Clone)]
pub struct CreateProductOffering {
    pub offering: OfferingInput,
}

impl Command for CreateProductOffering {
    type Output = OfferingView;
}

#[derive(Debug, Clone)]
pub struct UpdateProductOffering {
    pub id: i32,
    pub offering: OfferingInput,
}

impl Command for UpdateProductOffering {
    type Output = Option<OfferingView>;
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteProductOffering {
    pub id: i32,
}

impl Command for DeleteProductOffering {
    type Output = bool;
}

db_handlers!(CreateProductOfferingHandler, UpdateProductOfferingHandler, DeleteProductOfferingHandler);

#[async_trait]
impl CommandHandler<CreateProductOffering> for CreateProductOfferingHandler {
    #[instrument(skip(self, command, cancel), fields(name = %command.offering.name, components = command.offering.components.len()))]
    async fn handle(&self, command: CreateProductOffering, cancel: &CancellationToken) -> Result<OfferingView, ServiceError> {
        let input = command.offering;
        let session = AuditSession::begin(&self.db).await?;
        validate_components(session.conn(), &input.components).await?;

        let mut am = product_offering::ActiveModel::default();
        input.apply(&mut am);
        let created = session.add(am).await?;
        session
            .replace_owned::<product_offering_component::Entity>(created.id, input.component_rows(created.id))
            .await?;
        let components = load_components(session.conn(), &[created.id]).await?;
        session.commit(cancel).await?;

        info!(id = created.id, "product offering created");
        Ok(OfferingView::new(created, components))
    }
}

#[async_trait]
impl CommandHandler<UpdateProductOffering> for UpdateProductOfferingHandler {
    #[instrument(skip(self, command, cancel), fields(id = command.id, components = command.offering.components.len()))]
    async fn handle(
        &self,
        command: UpdateProductOffering,
        cancel: &CancellationToken,
    ) -> Result<Option<OfferingView>, ServiceError> {
        let input = command.offering;
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = product_offering::Entity::find_live_by_id(command.id).one(session.conn()).await? else {
            return Ok(None);
        };
        validate_components(session.conn(), &input.components).await?;

        let mut am: product_offering::ActiveModel = existing.into();
        input.apply(&mut am);
        let updated = session.modify(am).await?;
        session
            .replace_owned::<product_offering_component::Entity>(updated.id, input.component_rows(updated.id))
            .await?;
        let components = load_components(session.conn(), &[updated.id]).await?;
        session.commit(cancel).await?;

        info!(id = updated.id, components = components.len(), "product offering updated");
        Ok(Some(OfferingView::new(updated, components)))
    }
}

#[async_trait]
impl CommandHandler<DeleteProductOffering> for DeleteProductOfferingHandler {
    #[instrument(skip(self, cancel))]
    async fn handle(&self, command: DeleteProductOffering, cancel: &CancellationToken) -> Result<bool, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = product_offering::Entity::find_live_by_id(command.id).one(session.conn()).await? else {
            return Ok(false);
        };
        session.remove(product_offering::ActiveModel::from(existing)).await?;
        session.commit(cancel).await?;

        info!(id = command.id, "product offering deleted");
        Ok(true)
    }
}
