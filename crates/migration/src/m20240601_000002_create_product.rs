use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string_len(Product::Sku, 64).default(""))
                    .col(string(Product::Name).default(""))
                    .col(string(Product::Category).default(""))
                    .col(text(Product::Description).default(""))
                    .col(double_null(Product::PriceOneOff))
                    .col(double_null(Product::PriceMonthly))
                    .col(json(Product::Sequence))
                    .col(json(Product::CfsIds))
                    .col(timestamp_with_time_zone(Product::CreatedAt))
                    .col(timestamp_with_time_zone(Product::LastModified))
                    .col(boolean(Product::IsDeleted).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Sku,
    Name,
    Category,
    Description,
    PriceOneOff,
    PriceMonthly,
    Sequence,
    CfsIds,
    CreatedAt,
    LastModified,
    IsDeleted,
}
