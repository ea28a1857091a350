use async_trait::async_trait;
use models::{customer, SoftDeletable};
use sea_orm::{EntityTrait, QueryOrder};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::domain::{find_live_by_crm_id, CustomerDetail, CustomerView};
use crate::tickets::requested_by;
use crate::cqrs::{db_handlers, Query, QueryHandler};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllCustomers;

impl Query for GetAllCustomers {
    type Output = Vec<CustomerView>;
}

#[derive(Debug, Clone, Copy)]
pub struct GetCustomerById {
    pub id: i32,
}

impl Query for GetCustomerById {
    type Output = Option<CustomerView>;
}

/// Live customer by CRM id, with its live tickets.
#[derive(Debug, Clone)]
pub struct GetCustomerByCrmId {
    pub crm_id: String,
}

impl Query for GetCustomerByCrmId {
    type Output = Option<CustomerDetail>;
}

db_handlers!(GetAllCustomersHandler, GetCustomerByIdHandler, GetCustomerByCrmIdHandler);

#[async_trait]
impl QueryHandler<GetAllCustomers> for GetAllCustomersHandler {
    #[instrument(skip_all)]
    async fn handle(&self, _query: GetAllCustomers, _cancel: &CancellationToken) -> Result<Vec<CustomerView>, ServiceError> {
        let rows = customer::Entity::find_live()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(CustomerView::from).collect())
    }
}

#[async_trait]
impl QueryHandler<GetCustomerById> for GetCustomerByIdHandler {
    #[instrument(skip(self, _cancel))]
    async fn handle(&self, query: GetCustomerById, _cancel: &CancellationToken) -> Result<Option<CustomerView>, ServiceError> {
        let found = customer::Entity::find_live_by_id(query.id).one(&self.db).await?;
        Ok(found.map(CustomerView::from))
    }
}

#[async_trait]
impl QueryHandler<GetCustomerByCrmId> for GetCustomerByCrmIdHandler {
    #[instrument(skip(self, query, _cancel), fields(crm_id = %query.crm_id))]
    async fn handle(&self, query: GetCustomerByCrmId, _cancel: &CancellationToken) -> Result<Option<CustomerDetail>, ServiceError> {
        let Some(found) = find_live_by_crm_id(&self.db, &query.crm_id).await? else {
            return Ok(None);
        };
        let tickets = requested_by(&self.db, found.id).await?;
        Ok(Some(CustomerDetail { customer: found.into(), tickets }))
    }
}
