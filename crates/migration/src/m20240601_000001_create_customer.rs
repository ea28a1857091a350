use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(pk_auto(Customer::Id))
                    .col(string_len(Customer::CrmId, 64).default(""))
                    .col(string(Customer::Name).default(""))
                    .col(string(Customer::Email).default(""))
                    .col(string(Customer::Company).default(""))
                    .col(string_len(Customer::Type, 64).default(""))
                    .col(string(Customer::Industry).default(""))
                    .col(double(Customer::AnnualRevenue).default(0.0))
                    .col(string_len(Customer::Phone, 64).default(""))
                    .col(string_len(Customer::Fax, 64).default(""))
                    .col(string(Customer::Website).default(""))
                    .col(integer(Customer::NumberOfEmployees).default(0))
                    .col(string_len(Customer::Rating, 32).default(""))
                    .col(string(Customer::AccountManager).default(""))
                    .col(string_len(Customer::State, 64).default(""))
                    // Address value objects, flattened
                    .col(string(Customer::BillingStreet).default(""))
                    .col(string(Customer::BillingCity).default(""))
                    .col(string(Customer::BillingState).default(""))
                    .col(string_len(Customer::BillingPostalCode, 32).default(""))
                    .col(string(Customer::BillingCountry).default(""))
                    .col(string(Customer::ShippingStreet).default(""))
                    .col(string(Customer::ShippingCity).default(""))
                    .col(string(Customer::ShippingState).default(""))
                    .col(string_len(Customer::ShippingPostalCode, 32).default(""))
                    .col(string(Customer::ShippingCountry).default(""))
                    .col(timestamp_with_time_zone(Customer::CreatedAt))
                    .col(timestamp_with_time_zone(Customer::LastModified))
                    .col(boolean(Customer::IsDeleted).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    Id,
    CrmId,
    Name,
    Email,
    Company,
    Type,
    Industry,
    AnnualRevenue,
    Phone,
    Fax,
    Website,
    NumberOfEmployees,
    Rating,
    AccountManager,
    State,
    BillingStreet,
    BillingCity,
    BillingState,
    BillingPostalCode,
    BillingCountry,
    ShippingStreet,
    ShippingCity,
    ShippingState,
    ShippingPostalCode,
    ShippingCountry,
    CreatedAt,
    LastModified,
    IsDeleted,
}
