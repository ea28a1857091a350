use async_trait::async_trait;
use models::{cfs_characteristic, customer_facing_service, SoftDeletable};
use sea_orm::EntityTrait;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::domain::{load_characteristics, CfsInput, CfsView};
use crate::cqrs::{db_handlers, Command, CommandHandler};
use crate::errors::ServiceError;
use crate::persistence::AuditSession;

#[derive(Debug, Clone)]
pub struct CreateCustomerFacingService {
    pub cfs: CfsInput,
}

impl Command for CreateCustomerFacingService {
    type Output = CfsView;
}

#[derive(Debug, Clone)]
pub struct UpdateCustomerFacingService {
    pub id: i32,
    pub cfs: CfsInput,
}

impl Command for UpdateCustomerFacingService {
    type Output = Option<CfsView>;
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteCustomerFacingService {
    pub id: i32,
}

impl Command for DeleteCustomerFacingService {
    type Output = bool;
}

db_handlers!(
    CreateCustomerFacingServiceHandler,
    UpdateCustomerFacingServiceHandler,
    DeleteCustomerFacingServiceHandler,
);

#[async_trait]
impl CommandHandler<CreateCustomerFacingService> for CreateCustomerFacingServiceHandler {
    #[instrument(skip(self, command, cancel), fields(name = %command.cfs.name))]
    async fn handle(&self, command: CreateCustomerFacingService, cancel: &CancellationToken) -> Result<CfsView, ServiceError> {
        let input = command.cfs;
        let session = AuditSession::begin(&self.db).await?;

        let mut am = customer_facing_service::ActiveModel::default();
        input.apply(&mut am);
        let created = session.add(am).await?;
        session
            .replace_owned::<cfs_characteristic::Entity>(created.id, input.characteristic_rows(created.id))
            .await?;
        let characteristics = load_characteristics(session.conn(), &[created.id]).await?;
        session.commit(cancel).await?;

        info!(id = created.id, "customer-facing service created");
        Ok(CfsView::new(created, characteristics))
    }
}

#[async_trait]
impl CommandHandler<UpdateCustomerFacingService> for UpdateCustomerFacingServiceHandler {
    #[instrument(skip(self, command, cancel), fields(id = command.id))]
    async fn handle(
        &self,
        command: UpdateCustomerFacingService,
        cancel: &CancellationToken,
    ) -> Result<Option<CfsView>, ServiceError> {
        let input = command.cfs;
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = customer_facing_service::Entity::find_live_by_id(command.id).one(session.conn()).await?
        else {
            return Ok(None);
        };

        let mut am: customer_facing_service::ActiveModel = existing.into();
        input.apply(&mut am);
        let updated = session.modify(am).await?;
        session
            .replace_owned::<cfs_characteristic::Entity>(updated.id, input.characteristic_rows(updated.id))
            .await?;
        let characteristics = load_characteristics(session.conn(), &[updated.id]).await?;
        session.commit(cancel).await?;

        info!(id = updated.id, characteristics = characteristics.len(), "customer-facing service updated");
        Ok(Some(CfsView::new(updated, characteristics)))
    }
}

#[async_trait]
impl CommandHandler<DeleteCustomerFacingService> for DeleteCustomerFacingServiceHandler {
    #[instrument(skip(self, cancel))]
    async fn handle(&self, command: DeleteCustomerFacingService, cancel: &CancellationToken) -> Result<bool, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = customer_facing_service::Entity::find_live_by_id(command.id).one(session.conn()).await?
        else {
            return Ok(false);
        };
        session.remove(customer_facing_service::ActiveModel::from(existing)).await?;
        session.commit(cancel).await?;

        info!(id = command.id, "customer-facing service deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfs::{
        CharacteristicInput, GetAllCustomerFacingServices, GetAllCustomerFacingServicesHandler,
        GetCustomerFacingServiceById, GetCustomerFacingServiceByIdHandler,
    };
    use crate::cqrs::QueryHandler;
    use crate::test_support::get_db;

    fn characteristic(name: &str, configurable: bool) -> CharacteristicInput {
        CharacteristicInput { name: name.into(), value_type: "string".into(), configurable }
    }

    fn broadband(characteristics: Vec<CharacteristicInput>) -> CfsInput {
        CfsInput {
            name: "Broadband".into(),
            category: "connectivity".into(),
            lifecycle_state: "active".into(),
            version: "1.0".into(),
            service_spec_ids: vec![7, 9],
            activation_sequence: vec!["provision".into(), "activate".into()],
            characteristics,
        }
    }

    #[tokio::test]
    async fn characteristics_keep_input_order() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let created = CreateCustomerFacingServiceHandler::new(db.clone())
            .handle(
                CreateCustomerFacingService {
                    cfs: broadband(vec![characteristic("speed", true), characteristic("ip", false), characteristic("area", false)]),
                },
                &cancel,
            )
            .await?;

        let found = GetCustomerFacingServiceByIdHandler::new(db.clone())
            .handle(GetCustomerFacingServiceById { id: created.id }, &cancel)
            .await?
            .expect("cfs");
        let names: Vec<&str> = found.characteristics.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["speed", "ip", "area"]);
        assert_eq!(found.service_spec_ids, vec![7, 9]);
        Ok(())
    }

    #[tokio::test]
    async fn update_without_collections_clears_them() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let created = CreateCustomerFacingServiceHandler::new(db.clone())
            .handle(CreateCustomerFacingService { cfs: broadband(vec![characteristic("speed", true)]) }, &cancel)
            .await?;

        let input = CfsInput { name: "Broadband v2".into(), ..Default::default() };
        let updated = UpdateCustomerFacingServiceHandler::new(db.clone())
            .handle(UpdateCustomerFacingService { id: created.id, cfs: input }, &cancel)
            .await?
            .expect("updated");
        assert_eq!(updated.name, "Broadband v2");
        assert!(updated.characteristics.is_empty());
        assert!(updated.activation_sequence.is_empty());
        assert!(updated.last_modified >= created.last_modified);

        let all = GetAllCustomerFacingServicesHandler::new(db.clone())
            .handle(GetAllCustomerFacingServices, &cancel)
            .await?;
        assert!(all[0].characteristics.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_id_report_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let updated = UpdateCustomerFacingServiceHandler::new(db.clone())
            .handle(UpdateCustomerFacingService { id: 41, cfs: broadband(Vec::new()) }, &cancel)
            .await?;
        assert!(updated.is_none());
        assert!(!DeleteCustomerFacingServiceHandler::new(db.clone())
            .handle(DeleteCustomerFacingService { id: 41 }, &cancel)
            .await?);
        Ok(())
    }

    #[tokio::test]
    async fn deleted_service_is_excluded_from_listing() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let create = CreateCustomerFacingServiceHandler::new(db.clone());
        let keep = create.handle(CreateCustomerFacingService { cfs: broadband(Vec::new()) }, &cancel).await?;
        let drop = create.handle(CreateCustomerFacingService { cfs: broadband(Vec::new()) }, &cancel).await?;

        DeleteCustomerFacingServiceHandler::new(db.clone())
            .handle(DeleteCustomerFacingService { id: drop.id }, &cancel)
            .await?;
        let all = GetAllCustomerFacingServicesHandler::new(db.clone())
            .handle(GetAllCustomerFacingServices, &cancel)
            .await?;
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![keep.id]);
        Ok(())
    }
}
