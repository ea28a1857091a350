use async_trait::async_trait;
use models::{product, SoftDeletable};
use sea_orm::{EntityTrait, QueryOrder};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::domain::ProductView;
use crate::cqrs::{db_handlers, Query, QueryHandler};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllProducts;

impl Query for GetAllProducts {
    type Output = Vec<ProductView>;
}

#[derive(Debug, Clone, Copy)]
pub struct GetProductById {
    pub id: i32,
}

impl Query for GetProductById {
    type Output = Option<ProductView>;
}

db_handlers!(GetAllProductsHandler, GetProductByIdHandler);

#[async_trait]
impl QueryHandler<GetAllProducts> for GetAllProductsHandler {
    #[instrument(skip_all)]
    async fn handle(&self, _query: GetAllProducts, _cancel: &CancellationToken) -> Result<Vec<ProductView>, ServiceError> {
        Ok(product::Entity::find_live().order_by_asc(product::Column::Id).all(&self.db).await?)
    }
}

#[async_trait]
impl QueryHandler<GetProductById> for GetProductByIdHandler {
    #[instrument(skip(self, _cancel))]
    async fn handle(&self, query: GetProductById, _cancel: &CancellationToken) -> Result<Option<ProductView>, ServiceError> {
        Ok(product::Entity::find_live_by_id(query.id).one(&self.db).await?)
    }
}
