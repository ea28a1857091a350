use models::product;
use models::types::{IntList, StringList};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Product fields accepted on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price_one_off: Option<f64>,
    pub price_monthly: Option<f64>,
    pub sequence: Vec<String>,
    pub cfs_ids: Vec<i32>,
}

/// Product rows need no reshaping for callers.
pub type ProductView = product::Model;

impl ProductInput {
    pub(crate) fn apply(self, am: &mut product::ActiveModel) {
        am.sku = Set(self.sku);
        am.name = Set(self.name);
        am.category = Set(self.category);
        am.description = Set(self.description);
        am.price_one_off = Set(self.price_one_off);
        am.price_monthly = Set(self.price_monthly);
        am.sequence = Set(StringList(self.sequence));
        am.cfs_ids = Set(IntList(self.cfs_ids));
    }
}
