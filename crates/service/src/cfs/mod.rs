//! Customer-facing services and their characteristics.

mod commands;
mod domain;
mod queries;

pub use commands::*;
pub use domain::{CfsInput, CfsView, CharacteristicInput, CharacteristicView};
pub use queries::*;
