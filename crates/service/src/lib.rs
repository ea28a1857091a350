//! Catalog business layer.
//! - Requests are typed commands and queries routed by [`cqrs::Dispatcher`].
//! - Every write goes through [`persistence::AuditSession`], which stamps audit
//!   columns and turns deletes into soft deletes.
//! - Handler families live in one module per aggregate.

pub mod errors;
pub mod cqrs;
pub mod persistence;
pub mod customers;
pub mod products;
pub mod offerings;
pub mod cfs;
pub mod tickets;
pub mod registry;
#[cfg(test)]
pub mod test_support;

pub use cqrs::{Dispatcher, DispatchError};
pub use errors::ServiceError;
pub use registry::build_dispatcher;
