use std::path::PathBuf;

use log::debug;

use super::market_prices_model::PriceRecord;
use super::market_prices_traits::PriceRecordRepositoryTrait;
use crate::errors::{Error, Result};

/// Reads the static mock price file, a JSON array of
/// `{commodity, price, market, date}` records.
pub struct JsonPriceRecordRepository {
    path: PathBuf,
}

impl JsonPriceRecordRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn check_record(index: usize, record: &PriceRecord) -> Result<()> {
        if record.commodity.trim().is_empty() {
            return Err(Error::PriceData(format!(
                "record {} has an empty commodity",
                index
            )));
        }
        if record.market.trim().is_empty() {
            return Err(Error::PriceData(format!(
                "record {} has an empty market",
                index
            )));
        }
        if !record.price.is_finite() || record.price < 0.0 {
            return Err(Error::PriceData(format!(
                "record {} has an invalid price {}",
                index, record.price
            )));
        }
        Ok(())
    }
}

impl PriceRecordRepositoryTrait for JsonPriceRecordRepository {
    fn load_all(&self) -> Result<Vec<PriceRecord>> {
        let raw = std::fs::read_to_string(&self.path)?;
        let records: Vec<PriceRecord> = serde_json::from_str(&raw).map_err(|e| {
            Error::PriceData(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        for (index, record) in records.iter().enumerate() {
            Self::check_record(index, record)?;
        }

        debug!(
            "Loaded {} price records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
