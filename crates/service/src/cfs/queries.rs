use std::collections::HashMap;

use async_trait::async_trait;
use models::{customer_facing_service, SoftDeletable};
use sea_orm::{EntityTrait, QueryOrder};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::domain::{load_characteristics, CfsView};
use crate::cqrs::{db_handlers, Query, QueryHandler};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllCustomerFacingServices;

impl Query for GetAllCustomerFacingServices {
    type Output = Vec<CfsView>;
}

#[derive(Debug, Clone, Copy)]
pub struct GetCustomerFacingServiceById {
    pub id: i32,
}

impl Query for GetCustomerFacingServiceById {
    type Output = Option<CfsView>;
}

db_handlers!(GetAllCustomerFacingServicesHandler, GetCustomerFacingServiceByIdHandler);

#[async_trait]
impl QueryHandler<GetAllCustomerFacingServices> for GetAllCustomerFacingServicesHandler {
    #[instrument(skip_all)]
    async fn handle(&self, _query: GetAllCustomerFacingServices, _cancel: &CancellationToken) -> Result<Vec<CfsView>, ServiceError> {
        let services = customer_facing_service::Entity::find_live()
            .order_by_asc(customer_facing_service::Column::Id)
            .all(&self.db)
            .await?;
        let ids: Vec<i32> = services.iter().map(|s| s.id).collect();
        let mut by_cfs: HashMap<i32, Vec<_>> = HashMap::new();
        for c in load_characteristics(&self.db, &ids).await? {
            by_cfs.entry(c.cfs_id).or_default().push(c);
        }
        Ok(services
            .into_iter()
            .map(|s| {
                let characteristics = by_cfs.remove(&s.id).unwrap_or_default();
                CfsView::new(s, characteristics)
            })
            .collect())
    }
}

#[async_trait]
impl QueryHandler<GetCustomerFacingServiceById> for GetCustomerFacingServiceByIdHandler {
    #[instrument(skip(self, _cancel))]
    async fn handle(&self, query: GetCustomerFacingServiceById, _cancel: &CancellationToken) -> Result<Option<CfsView>, ServiceError> {
        let Some(cfs) = customer_facing_service::Entity::find_live_by_id(query.id).one(&self.db).await? else {
            return Ok(None);
        };
        let characteristics = load_characteristics(&self.db, &[cfs.id]).await?;
        Ok(Some(CfsView::new(cfs, characteristics)))
    }
}
