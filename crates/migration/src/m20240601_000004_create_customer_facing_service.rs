use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerFacingService::Table)
                    .if_not_exists()
                    .col(pk_auto(CustomerFacingService::Id))
                    .col(string(CustomerFacingService::Name).default(""))
                    .col(string(CustomerFacingService::Category).default(""))
                    .col(string_len(CustomerFacingService::LifecycleState, 64).default(""))
                    .col(string_len(CustomerFacingService::Version, 32).default(""))
                    .col(json(CustomerFacingService::ServiceSpecIds))
                    .col(json(CustomerFacingService::ActivationSequence))
                    .col(timestamp_with_time_zone(CustomerFacingService::CreatedAt))
                    .col(timestamp_with_time_zone(CustomerFacingService::LastModified))
                    .col(boolean(CustomerFacingService::IsDeleted).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CfsCharacteristic::Table)
                    .if_not_exists()
                    .col(pk_auto(CfsCharacteristic::Id))
                    .col(integer(CfsCharacteristic::CfsId))
                    .col(string(CfsCharacteristic::Name).default(""))
                    .col(string_len(CfsCharacteristic::ValueType, 64).default(""))
                    .col(boolean(CfsCharacteristic::Configurable).default(false))
                    .col(integer(CfsCharacteristic::Position).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_characteristic_cfs")
                            .from(CfsCharacteristic::Table, CfsCharacteristic::CfsId)
                            .to(CustomerFacingService::Table, CustomerFacingService::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CfsCharacteristic::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(CustomerFacingService::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CustomerFacingService {
    Table,
    Id,
    Name,
    Category,
    LifecycleState,
    Version,
    ServiceSpecIds,
    ActivationSequence,
    CreatedAt,
    LastModified,
    IsDeleted,
}

#[derive(DeriveIden)]
enum CfsCharacteristic {
    Table,
    Id,
    CfsId,
    Name,
    ValueType,
    Configurable,
    Position,
}
