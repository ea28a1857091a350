//! Products: sellable items with fulfilment steps and CFS references.

mod commands;
mod domain;
mod queries;

pub use commands::*;
pub use domain::{ProductInput, ProductView};
pub use queries::*;
