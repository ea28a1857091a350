//! SeaORM entities for the product catalog plus the audit capability shared
//! by every persisted aggregate.

pub mod errors;
pub mod db;
pub mod types;
pub mod audit;
pub mod customer;
pub mod product;
pub mod product_offering;
pub mod product_offering_component;
pub mod customer_facing_service;
pub mod cfs_characteristic;
pub mod ticket;
pub mod ticket_comment;

pub use audit::{Auditable, OwnedCollection, SoftDeletable};

#[cfg(test)]
mod tests;
