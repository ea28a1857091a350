//! Product offerings: priced bundles of products with an activation sequence.

mod commands;
mod domain;
mod queries;

pub use commands::*;
pub use domain::{ComponentInput, ComponentView, OfferingInput, OfferingView};
pub use queries::*;
