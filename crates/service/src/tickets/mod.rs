//! Support tickets and their comments.
//!
//! Tickets are addressed by store id or by the downstream tracking id
//! (`dsId`). Lookups try the id first and fall back to the tracking id.

mod comments;
mod commands;
mod domain;
mod queries;

pub use comments::*;
pub use commands::*;
pub use domain::{generate_ds_id, CommentInput, CommentView, TicketInput, TicketKey, TicketView};
pub(crate) use domain::requested_by;
pub use queries::*;
