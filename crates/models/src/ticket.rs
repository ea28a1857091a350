use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const STATUSES: [&str; 6] = ["NEW", "OPEN", "PENDING", "HOLD", "SOLVED", "CLOSED"];
pub const PRIORITIES: [&str; 4] = ["LOW", "NORMAL", "HIGH", "URGENT"];
pub const DEFAULT_STATUS: &str = "NEW";
pub const DEFAULT_PRIORITY: &str = "LOW";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Tracking id assigned by the downstream ticketing system.
    pub ds_id: String,
    pub requester_id: i32,
    pub customer_crm_id: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    pub priority: String,
    pub submitter: String,
    pub assignee: String,
    pub created_at: DateTimeWithTimeZone,
    pub last_modified: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Requester,
    Comment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Requester => Entity::belongs_to(crate::customer::Entity)
                .from(Column::RequesterId)
                .to(crate::customer::Column::Id)
                .into(),
            Relation::Comment => Entity::has_many(crate::ticket_comment::Entity).into(),
        }
    }
}

impl Related<crate::customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Requester.def() }
}

impl Related<crate::ticket_comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comment.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Upper-case a status and check it against [`STATUSES`]. Blank means the default.
pub fn normalize_status(raw: &str) -> Result<String, ModelError> {
    normalize(raw, &STATUSES, DEFAULT_STATUS, "status")
}

/// Upper-case a priority and check it against [`PRIORITIES`]. Blank means the default.
pub fn normalize_priority(raw: &str) -> Result<String, ModelError> {
    normalize(raw, &PRIORITIES, DEFAULT_PRIORITY, "priority")
}

fn normalize(raw: &str, allowed: &[&str], default: &str, what: &str) -> Result<String, ModelError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(default.to_string());
    }
    let upper = value.to_ascii_uppercase();
    if allowed.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(ModelError::Validation(format!("{what} '{value}' must be one of {}", allowed.join(", "))))
    }
}
