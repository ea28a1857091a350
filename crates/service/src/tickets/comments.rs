use async_trait::async_trait;
use models::ticket_comment;
use sea_orm::Set;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::domain::{ensure_comment_ds_id_free, load_comments, CommentInput, CommentView, TicketKey};
use crate::cqrs::{db_handlers, Command, CommandHandler, Query, QueryHandler};
use crate::errors::ServiceError;
use crate::persistence::AuditSession;

#[derive(Debug, Clone)]
pub struct CreateTicketComment {
    pub ticket: TicketKey,
    pub comment: CommentInput,
}

impl Command for CreateTicketComment {
    type Output = CommentView;
}

/// Live comments of a ticket; an unknown ticket has none.
#[derive(Debug, Clone)]
pub struct GetCommentsByTicket {
    pub ticket: TicketKey,
}

impl Query for GetCommentsByTicket {
    type Output = Vec<CommentView>;
}

db_handlers!(CreateTicketCommentHandler, GetCommentsByTicketHandler);

#[async_trait]
impl CommandHandler<CreateTicketComment> for CreateTicketCommentHandler {
    #[instrument(skip(self, command, cancel), fields(ticket_id = ?command.ticket.id, ticket_ds_id = ?command.ticket.ds_id))]
    async fn handle(&self, command: CreateTicketComment, cancel: &CancellationToken) -> Result<CommentView, ServiceError> {
        let input = command.comment;
        let session = AuditSession::begin(&self.db).await?;
        let Some(ticket) = command.ticket.resolve(session.conn()).await? else {
            return Err(ServiceError::invariant("ticket not found"));
        };
        let ds_id = input.ds_id_or_generate();
        ensure_comment_ds_id_free(session.conn(), &ds_id).await?;

        let am = ticket_comment::ActiveModel {
            ticket_id: Set(ticket.id),
            ds_id: Set(ds_id),
            comment: Set(input.comment),
            author: Set(input.author),
            ..Default::default()
        };
        let created = session.add(am).await?;
        session.commit(cancel).await?;

        info!(id = created.id, ticket_id = ticket.id, ds_id = %created.ds_id, "ticket comment created");
        Ok(created)
    }
}

#[async_trait]
impl QueryHandler<GetCommentsByTicket> for GetCommentsByTicketHandler {
    #[instrument(skip(self, _cancel))]
    async fn handle(&self, query: GetCommentsByTicket, _cancel: &CancellationToken) -> Result<Vec<CommentView>, ServiceError> {
        match query.ticket.resolve(&self.db).await? {
            Some(ticket) => load_comments(&self.db, &[ticket.id]).await,
            None => Ok(Vec::new()),
        }
    }
}
