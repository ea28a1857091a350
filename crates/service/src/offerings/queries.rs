use std::collections::HashMap;

use async_trait::async_trait;
use models::{product_offering, SoftDeletable};
use sea_orm::{EntityTrait, QueryOrder};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::domain::{load_components, OfferingView};
use crate::cqrs::{db_handlers, Query, QueryHandler};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllProductOfferings;

impl Query for GetAllProductOfferings {
    type Output = Vec<OfferingView>;
}

#[derive(Debug, Clone, Copy)]
pub struct GetProductOfferingById {
    pub id: i32,
}

impl Query for GetProductOfferingById {
    type Output = Option<OfferingView>;
}

db_handlers!(GetAllProductOfferingsHandler, GetProductOfferingByIdHandler);

#[async_trait]
impl QueryHandler<GetAllProductOfferings> for GetAllProductOfferingsHandler {
    #[instrument(skip_all)]
    async fn handle(&self, _query: GetAllProductOfferings, _cancel: &CancellationToken) -> Result<Vec<OfferingView>, ServiceError> {
        let offerings = product_offering::Entity::find_live()
            .order_by_asc(product_offering::Column::Id)
            .all(&self.db)
            .await?;
        let ids: Vec<i32> = offerings.iter().map(|o| o.id).collect();
        let mut by_offering: HashMap<i32, Vec<_>> = HashMap::new();
        for c in load_components(&self.db, &ids).await? {
            by_offering.entry(c.product_offering_id).or_default().push(c);
        }
        Ok(offerings
            .into_iter()
            .map(|o| {
                let components = by_offering.remove(&o.id).unwrap_or_default();
                OfferingView::new(o, components)
            })
            .collect())
    }
}

#[async_trait]
impl QueryHandler<GetProductOfferingById> for GetProductOfferingByIdHandler {
    #[instrument(skip(self, _cancel))]
    async fn handle(&self, query: GetProductOfferingById, _cancel: &CancellationToken) -> Result<Option<OfferingView>, ServiceError> {
        let Some(offering) = product_offering::Entity::find_live_by_id(query.id).one(&self.db).await? else {
            return Ok(None);
        };
        let components = load_components(&self.db, &[offering.id]).await?;
        Ok(Some(OfferingView::new(offering, components)))
    }
}
