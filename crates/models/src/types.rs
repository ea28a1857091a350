//! Value types stored inside entity rows.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered list of strings kept in a JSON column (fulfilment or activation steps).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

/// Ordered list of integer references kept in a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct IntList(pub Vec<i32>);

impl From<Vec<String>> for StringList {
    fn from(v: Vec<String>) -> Self { Self(v) }
}

impl From<Vec<i32>> for IntList {
    fn from(v: Vec<i32>) -> Self { Self(v) }
}

/// Postal address embedded by value in a customer (billing and shipping).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Pricing terms embedded by value in a product offering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricePlan {
    pub currency: String,
    pub setup_fee: f64,
    pub monthly_fee: f64,
    pub billing_cycle: String,
}

impl Default for PricePlan {
    fn default() -> Self {
        Self { currency: "USD".into(), setup_fee: 0.0, monthly_fee: 0.0, billing_cycle: "calendarMonthly".into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_serialize_as_plain_arrays() {
        let s = serde_json::to_string(&StringList(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(s, r#"["a","b"]"#);
        let i: IntList = serde_json::from_str("[3,1,2]").unwrap();
        assert_eq!(i.0, vec![3, 1, 2]);
    }

    #[test]
    fn price_plan_defaults_fill_missing_fields() {
        let p: PricePlan = serde_json::from_str(r#"{"monthlyFee": 9.5}"#).unwrap();
        assert_eq!(p.currency, "USD");
        assert_eq!(p.billing_cycle, "calendarMonthly");
        assert_eq!(p.monthly_fee, 9.5);
    }
}
