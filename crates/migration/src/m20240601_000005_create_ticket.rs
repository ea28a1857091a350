use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string_len(Ticket::DsId, 64))
                    .col(integer(Ticket::RequesterId))
                    .col(string_len(Ticket::CustomerCrmId, 64).default(""))
                    .col(string(Ticket::Subject).default(""))
                    .col(text(Ticket::Description).default(""))
                    .col(string_len(Ticket::Status, 16).default("NEW"))
                    .col(string_len(Ticket::Priority, 16).default("LOW"))
                    .col(string(Ticket::Submitter).default(""))
                    .col(string(Ticket::Assignee).default(""))
                    .col(timestamp_with_time_zone(Ticket::CreatedAt))
                    .col(timestamp_with_time_zone(Ticket::LastModified))
                    .col(boolean(Ticket::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_requester")
                            .from(Ticket::Table, Ticket::RequesterId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TicketComment::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketComment::Id))
                    .col(integer(TicketComment::TicketId))
                    .col(string_len(TicketComment::DsId, 64))
                    .col(text(TicketComment::Comment).default(""))
                    .col(string(TicketComment::Author).default(""))
                    .col(timestamp_with_time_zone(TicketComment::CreatedAt))
                    .col(timestamp_with_time_zone(TicketComment::LastModified))
                    .col(boolean(TicketComment::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_ticket")
                            .from(TicketComment::Table, TicketComment::TicketId)
                            .to(Ticket::Table, Ticket::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TicketComment::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Ticket::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    Id,
    DsId,
    RequesterId,
    CustomerCrmId,
    Subject,
    Description,
    Status,
    Priority,
    Submitter,
    Assignee,
    CreatedAt,
    LastModified,
    IsDeleted,
}

#[derive(DeriveIden)]
enum TicketComment {
    Table,
    Id,
    TicketId,
    DsId,
    Comment,
    Author,
    CreatedAt,
    LastModified,
    IsDeleted,
}

#[derive(DeriveIden)]
enum Customer { Table, Id }
