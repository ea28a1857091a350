//! Customer accounts, addressable by store id or by CRM id.

mod commands;
mod domain;
mod queries;

pub use commands::*;
pub use domain::{CustomerDetail, CustomerInput, CustomerView};
pub(crate) use domain::find_live_by_crm_id;
pub use queries::*;
