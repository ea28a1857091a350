use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductOffering::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductOffering::Id))
                    .col(string(ProductOffering::Name).default(""))
                    .col(string_len(ProductOffering::Status, 64).default(""))
                    .col(text(ProductOffering::Description).default(""))
                    // PricePlan value object, flattened
                    .col(string_len(ProductOffering::PriceCurrency, 8).default("USD"))
                    .col(double(ProductOffering::PriceSetupFee).default(0.0))
                    .col(double(ProductOffering::PriceMonthlyFee).default(0.0))
                    .col(string_len(ProductOffering::PriceBillingCycle, 64).default("calendarMonthly"))
                    .col(json(ProductOffering::ActivationSequence))
                    .col(timestamp_with_time_zone(ProductOffering::CreatedAt))
                    .col(timestamp_with_time_zone(ProductOffering::LastModified))
                    .col(boolean(ProductOffering::IsDeleted).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductOfferingComponent::Table)
                    .if_not_exists()
                    .col(integer(ProductOfferingComponent::ProductOfferingId))
                    .col(integer(ProductOfferingComponent::ProductId))
                    .col(integer(ProductOfferingComponent::Quantity).default(1))
                    .col(string_len(ProductOfferingComponent::Billing, 32).default("oneOff"))
                    .primary_key(
                        Index::create()
                            .col(ProductOfferingComponent::ProductOfferingId)
                            .col(ProductOfferingComponent::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_component_offering")
                            .from(ProductOfferingComponent::Table, ProductOfferingComponent::ProductOfferingId)
                            .to(ProductOffering::Table, ProductOffering::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_component_product")
                            .from(ProductOfferingComponent::Table, ProductOfferingComponent::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductOfferingComponent::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ProductOffering::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductOffering {
    Table,
    Id,
    Name,
    Status,
    Description,
    PriceCurrency,
    PriceSetupFee,
    PriceMonthlyFee,
    PriceBillingCycle,
    ActivationSequence,
    CreatedAt,
    LastModified,
    IsDeleted,
}

#[derive(DeriveIden)]
enum ProductOfferingComponent {
    Table,
    ProductOfferingId,
    ProductId,
    Quantity,
    Billing,
}

#[derive(DeriveIden)]
enum Product { Table, Id }
