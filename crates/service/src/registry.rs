//! Handler wiring for the whole catalog.

use sea_orm::DatabaseConnection;

use crate::cfs::*;
use crate::cqrs::{DispatchError, Dispatcher, DispatcherBuilder};
use crate::customers::*;
use crate::offerings::*;
use crate::products::*;
use crate::tickets::*;

/// Every request type the HTTP surface sends. A build without a handler for
/// one of these fails before the server starts.
pub fn expect_catalog(builder: DispatcherBuilder) -> DispatcherBuilder {
    builder
        .expect_command::<CreateCustomer>()
        .expect_command::<UpdateCustomer>()
        .expect_command::<UpdateCustomerByCrmId>()
        .expect_command::<DeleteCustomer>()
        .expect_command::<DeleteCustomerByCrmId>()
        .expect_query::<GetAllCustomers>()
        .expect_query::<GetCustomerById>()
        .expect_query::<GetCustomerByCrmId>()
        .expect_command::<CreateProduct>()
        .expect_command::<UpdateProduct>()
        .expect_command::<DeleteProduct>()
        .expect_query::<GetAllProducts>()
        .expect_query::<GetProductById>()
        .expect_command::<CreateProductOffering>()
        .expect_command::<UpdateProductOffering>()
        .expect_command::<DeleteProductOffering>()
        .expect_query::<GetAllProductOfferings>()
        .expect_query::<GetProductOfferingById>()
        .expect_command::<CreateCustomerFacingService>()
        .expect_command::<UpdateCustomerFacingService>()
        .expect_command::<DeleteCustomerFacingService>()
        .expect_query::<GetAllCustomerFacingServices>()
        .expect_query::<GetCustomerFacingServiceById>()
        .expect_command::<CreateTicket>()
        .expect_command::<UpdateTicket>()
        .expect_command::<DeleteTicket>()
        .expect_query::<GetAllTickets>()
        .expect_query::<GetTicket>()
        .expect_command::<CreateTicketComment>()
        .expect_query::<GetCommentsByTicket>()
}

/// Register the catalog handlers over `db` without validating.
pub fn register_catalog(builder: DispatcherBuilder, db: &DatabaseConnection) -> DispatcherBuilder {
    builder
        .command::<CreateCustomer, _>(CreateCustomerHandler::new(db.clone()))
        .command::<UpdateCustomer, _>(UpdateCustomerHandler::new(db.clone()))
        .command::<UpdateCustomerByCrmId, _>(UpdateCustomerByCrmIdHandler::new(db.clone()))
        .command::<DeleteCustomer, _>(DeleteCustomerHandler::new(db.clone()))
        .command::<DeleteCustomerByCrmId, _>(DeleteCustomerByCrmIdHandler::new(db.clone()))
        .query::<GetAllCustomers, _>(GetAllCustomersHandler::new(db.clone()))
        .query::<GetCustomerById, _>(GetCustomerByIdHandler::new(db.clone()))
        .query::<GetCustomerByCrmId, _>(GetCustomerByCrmIdHandler::new(db.clone()))
        .command::<CreateProduct, _>(CreateProductHandler::new(db.clone()))
        .command::<UpdateProduct, _>(UpdateProductHandler::new(db.clone()))
        .command::<DeleteProduct, _>(DeleteProductHandler::new(db.clone()))
        .query::<GetAllProducts, _>(GetAllProductsHandler::new(db.clone()))
        .query::<GetProductById, _>(GetProductByIdHandler::new(db.clone()))
        .command::<CreateProductOffering, _>(CreateProductOfferingHandler::new(db.clone()))
        .command::<UpdateProductOffering, _>(UpdateProductOfferingHandler::new(db.clone()))
        .command::<DeleteProductOffering, _>(DeleteProductOfferingHandler::new(db.clone()))
        .query::<GetAllProductOfferings, _>(GetAllProductOfferingsHandler::new(db.clone()))
        .query::<GetProductOfferingById, _>(GetProductOfferingByIdHandler::new(db.clone()))
        .command::<CreateCustomerFacingService, _>(CreateCustomerFacingServiceHandler::new(db.clone()))
        .command::<UpdateCustomerFacingService, _>(UpdateCustomerFacingServiceHandler::new(db.clone()))
        .command::<DeleteCustomerFacingService, _>(DeleteCustomerFacingServiceHandler::new(db.clone()))
        .query::<GetAllCustomerFacingServices, _>(GetAllCustomerFacingServicesHandler::new(db.clone()))
        .query::<GetCustomerFacingServiceById, _>(GetCustomerFacingServiceByIdHandler::new(db.clone()))
        .command::<CreateTicket, _>(CreateTicketHandler::new(db.clone()))
        .command::<UpdateTicket, _>(UpdateTicketHandler::new(db.clone()))
        .command::<DeleteTicket, _>(DeleteTicketHandler::new(db.clone()))
        .query::<GetAllTickets, _>(GetAllTicketsHandler::new(db.clone()))
        .query::<GetTicket, _>(GetTicketHandler::new(db.clone()))
        .command::<CreateTicketComment, _>(CreateTicketCommentHandler::new(db.clone()))
        .query::<GetCommentsByTicket, _>(GetCommentsByTicketHandler::new(db.clone()))
}

/// Validated dispatcher with one handler per catalog request type.
pub fn build_dispatcher(db: &DatabaseConnection) -> Result<Dispatcher, DispatchError> {
    let builder = expect_catalog(Dispatcher::builder());
    register_catalog(builder, db).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn catalog_registry_is_complete() {
        let dispatcher = build_dispatcher(&DatabaseConnection::Disconnected).expect("valid registry");
        assert!(dispatcher.handles_command::<CreateTicketComment>());
        assert!(dispatcher.handles_query::<GetCommentsByTicket>());
        assert!(dispatcher.handles_command::<UpdateCustomerByCrmId>());
    }

    #[test]
    fn registering_twice_fails_the_build() {
        let db = DatabaseConnection::Disconnected;
        let builder = register_catalog(Dispatcher::builder(), &db).query::<GetAllProducts, _>(GetAllProductsHandler::new(db.clone()));
        assert!(matches!(builder.build(), Err(DispatchError::DuplicateHandler(_))));
    }

    #[test]
    fn expectations_catch_a_forgotten_handler() {
        let builder = expect_catalog(Dispatcher::builder())
            .command::<CreateProduct, _>(CreateProductHandler::new(DatabaseConnection::Disconnected));
        assert!(matches!(builder.build(), Err(DispatchError::MissingHandler(_))));
    }

    #[tokio::test]
    async fn dispatch_reaches_the_database() -> anyhow::Result<()> {
        let db = crate::test_support::get_db().await?;
        let dispatcher = build_dispatcher(&db)?;
        let cancel = CancellationToken::new();

        let created = dispatcher
            .send(CreateProduct { product: ProductInput { sku: "X1".into(), name: "Widget".into(), ..Default::default() } }, &cancel)
            .await?;
        let found = dispatcher.query(GetProductById { id: created.id }, &cancel).await?;
        assert_eq!(found, Some(created));
        Ok(())
    }
}
