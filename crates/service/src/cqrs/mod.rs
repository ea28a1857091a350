//! Command/query dispatch.
//!
//! Every request type names its result through [`Command`] or [`Query`] and is
//! served by exactly one handler. The [`Dispatcher`] is assembled once through
//! [`DispatcherBuilder`], which refuses to build when an expected request type
//! has no handler or when a type is registered twice.
//!
//! ```
//! use async_trait::async_trait;
//! use service::cqrs::{Command, CommandHandler, Dispatcher};
//! use service::ServiceError;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Ping;
//! impl Command for Ping {
//!     type Output = &'static str;
//! }
//!
//! struct PingHandler;
//!
//! #[async_trait]
//! impl CommandHandler<Ping> for PingHandler {
//!     async fn handle(&self, _: Ping, _: &CancellationToken) -> Result<&'static str, ServiceError> {
//!         Ok("pong")
//!     }
//! }
//!
//! let dispatcher = Dispatcher::builder()
//!     .expect_command::<Ping>()
//!     .command::<Ping, _>(PingHandler)
//!     .build()
//!     .unwrap();
//! let reply = tokio_test::block_on(dispatcher.send(Ping, &CancellationToken::new())).unwrap();
//! assert_eq!(reply, "pong");
//! ```

mod dispatcher;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::errors::ServiceError;

pub use dispatcher::{Dispatcher, DispatcherBuilder};

/// A state-changing request.
pub trait Command: Send + 'static {
    type Output: Send + 'static;
}

/// A read-only request.
pub trait Query: Send + 'static {
    type Output: Send + 'static;
}

#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync + 'static {
    async fn handle(&self, command: C, cancel: &CancellationToken) -> Result<C::Output, ServiceError>;
}

#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync + 'static {
    async fn handle(&self, query: Q, cancel: &CancellationToken) -> Result<Q::Output, ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no handler registered for {0}")]
    MissingHandler(&'static str),
    #[error("more than one handler registered for {0}")]
    DuplicateHandler(&'static str),
}

/// Declares handler structs that only carry the connection pool.
macro_rules! db_handlers {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(Clone)]
            pub struct $name {
                db: sea_orm::DatabaseConnection,
            }

            impl $name {
                pub fn new(db: sea_orm::DatabaseConnection) -> Self { Self { db } }
            }
        )+
    };
}

pub(crate) use db_handlers;
