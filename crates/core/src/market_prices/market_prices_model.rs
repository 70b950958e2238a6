//! Mandi price domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed commodity price at a market (per quintal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub commodity: String,
    pub price: f64,
    pub market: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

/// A single point of a commodity's price history, for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl From<&PriceRecord> for PricePoint {
    fn from(record: &PriceRecord) -> Self {
        Self {
            date: record.date,
            price: record.price,
        }
    }
}
