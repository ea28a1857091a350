use async_trait::async_trait;
use models::{ticket, SoftDeletable};
use sea_orm::{EntityTrait, QueryOrder};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::domain::{load_comments, with_comments, TicketKey, TicketView};
use crate::cqrs::{db_handlers, Query, QueryHandler};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllTickets;

impl Query for GetAllTickets {
    type Output = Vec<TicketView>;
}

#[derive(Debug, Clone)]
pub struct GetTicket {
    pub key: TicketKey,
}

impl Query for GetTicket {
    type Output = Option<TicketView>;
}

db_handlers!(GetAllTicketsHandler, GetTicketHandler);

#[async_trait]
impl QueryHandler<GetAllTickets> for GetAllTicketsHandler {
    #[instrument(skip_all)]
    async fn handle(&self, _query: GetAllTickets, _cancel: &CancellationToken) -> Result<Vec<TicketView>, ServiceError> {
        let tickets = ticket::Entity::find_live().order_by_asc(ticket::Column::Id).all(&self.db).await?;
        with_comments(&self.db, tickets).await
    }
}

#[async_trait]
impl QueryHandler<GetTicket> for GetTicketHandler {
    #[instrument(skip(self, _cancel))]
    async fn handle(&self, query: GetTicket, _cancel: &CancellationToken) -> Result<Option<TicketView>, ServiceError> {
        let Some(ticket) = query.key.resolve(&self.db).await? else {
            return Ok(None);
        };
        let comments = load_comments(&self.db, &[ticket.id]).await?;
        Ok(Some(TicketView::new(ticket, comments)))
    }
}
