use async_trait::async_trait;
use models::{product, SoftDeletable};
use sea_orm::EntityTrait;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::domain::{ProductInput, ProductView};
use crate::cqrs::{db_handlers, Command, CommandHandler};
use crate::errors::ServiceError;
use crate::persistence::AuditSession;

#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub product: ProductInput,
}

impl Command for CreateProduct {
    type Output = ProductView;
}

#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub id: i32,
    pub product: ProductInput,
}

impl Command for UpdateProduct {
    type Output = Option<ProductView>;
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteProduct {
    pub id: i32,
}

impl Command for DeleteProduct {
    type Output = bool;
}

db_handlers!(CreateProductHandler, UpdateProductHandler, DeleteProductHandler);

#[async_trait]
impl CommandHandler<CreateProduct> for CreateProductHandler {
    #[instrument(skip(self, command, cancel), fields(sku = %command.product.sku))]
    async fn handle(&self, command: CreateProduct, cancel: &CancellationToken) -> Result<ProductView, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let mut am = product::ActiveModel::default();
        command.product.apply(&mut am);
        let created = session.add(am).await?;
        session.commit(cancel).await?;

        info!(id = created.id, sku = %created.sku, "product created");
        Ok(created)
    }
}

#[async_trait]
impl CommandHandler<UpdateProduct> for UpdateProductHandler {
    #[instrument(skip(self, command, cancel), fields(id = command.id))]
    async fn handle(&self, command: UpdateProduct, cancel: &CancellationToken) -> Result<Option<ProductView>, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = product::Entity::find_live_by_id(command.id).one(session.conn()).await? else {
            return Ok(None);
        };
        let mut am: product::ActiveModel = existing.into();
        command.product.apply(&mut am);
        let updated = session.modify(am).await?;
        session.commit(cancel).await?;

        info!(id = updated.id, "product updated");
        Ok(Some(updated))
    }
}

#[async_trait]
impl CommandHandler<DeleteProduct> for DeleteProductHandler {
    #[instrument(skip(self, cancel))]
    async fn handle(&self, command: DeleteProduct, cancel: &CancellationToken) -> Result<bool, ServiceError> {
        let session = AuditSession::begin(&self.db).await?;
        let Some(existing) = product::Entity::find_live_by_id(command.id).one(session.conn()).await? else {
            return Ok(false);
        };
        session.remove(product::ActiveModel::from(existing)).await?;
        session.commit(cancel).await?;

        info!(id = command.id, "product deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cqrs::QueryHandler;
    use crate::products::{GetAllProducts, GetAllProductsHandler, GetProductById, GetProductByIdHandler};
    use crate::test_support::get_db;

    fn widget(sku: &str) -> ProductInput {
        ProductInput {
            sku: sku.into(),
            name: "Widget".into(),
            sequence: vec!["order".into(), "ship".into()],
            cfs_ids: vec![7],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids_and_round_trips() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let create = CreateProductHandler::new(db.clone());

        let a = create.handle(CreateProduct { product: widget("X1") }, &cancel).await?;
        let b = create.handle(CreateProduct { product: widget("X2") }, &cancel).await?;
        assert_ne!(a.id, b.id);

        let found = GetProductByIdHandler::new(db.clone())
            .handle(GetProductById { id: a.id }, &cancel)
            .await?
            .expect("product");
        assert_eq!(found, a);
        assert_eq!(found.sequence.0, vec!["order", "ship"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_scalars_and_lists() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let created = CreateProductHandler::new(db.clone()).handle(CreateProduct { product: widget("X1") }, &cancel).await?;

        let changed = ProductInput { price_monthly: Some(12.5), sequence: Vec::new(), ..widget("X1-B") };
        let updated = UpdateProductHandler::new(db.clone())
            .handle(UpdateProduct { id: created.id, product: changed }, &cancel)
            .await?
            .expect("updated");
        assert_eq!(updated.sku, "X1-B");
        assert_eq!(updated.price_monthly, Some(12.5));
        assert!(updated.sequence.0.is_empty());
        assert_eq!(updated.created_at, created.created_at);

        assert!(UpdateProductHandler::new(db.clone())
            .handle(UpdateProduct { id: created.id + 100, product: widget("none") }, &cancel)
            .await?
            .is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_hides_product_and_second_delete_is_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cancel = CancellationToken::new();
        let created = CreateProductHandler::new(db.clone()).handle(CreateProduct { product: widget("X1") }, &cancel).await?;
        let delete = DeleteProductHandler::new(db.clone());

        assert!(delete.handle(DeleteProduct { id: created.id }, &cancel).await?);
        assert!(!delete.handle(DeleteProduct { id: created.id }, &cancel).await?);
        assert!(GetAllProductsHandler::new(db.clone()).handle(GetAllProducts, &cancel).await?.is_empty());

        let raw = product::Entity::find_by_id(created.id).one(&db).await?.expect("still stored");
        assert!(raw.is_deleted);
        assert!(raw.last_modified >= created.last_modified);
        Ok(())
    }
}
