use sea_orm_migration::prelude::*;

// Lookup indexes. Uniqueness of live external ids lives in the next migration.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_crm_id")
                    .table(Customer::Table)
                    .col(Customer::CrmId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_ds_id")
                    .table(Ticket::Table)
                    .col(Ticket::DsId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_requester")
                    .table(Ticket::Table)
                    .col(Ticket::RequesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_comment_ticket")
                    .table(TicketComment::Table)
                    .col(TicketComment::TicketId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_comment_ds_id")
                    .table(TicketComment::Table)
                    .col(TicketComment::DsId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cfs_characteristic_cfs")
                    .table(CfsCharacteristic::Table)
                    .col(CfsCharacteristic::CfsId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customer_crm_id").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ticket_ds_id").table(Ticket::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ticket_requester").table(Ticket::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ticket_comment_ticket").table(TicketComment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ticket_comment_ds_id").table(TicketComment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cfs_characteristic_cfs").table(CfsCharacteristic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, CrmId }

#[derive(DeriveIden)]
enum Ticket { Table, DsId, RequesterId }

#[derive(DeriveIden)]
enum TicketComment { Table, TicketId, DsId }

#[derive(DeriveIden)]
enum CfsCharacteristic { Table, CfsId }
