use super::market_prices_model::{PricePoint, PriceRecord};
use crate::errors::Result;

/// Source of raw price records.
pub trait PriceRecordRepositoryTrait: Send + Sync {
    /// Load every record. Implementations re-read their source on each call.
    fn load_all(&self) -> Result<Vec<PriceRecord>>;
}

/// Views over the price data used by the dashboard.
pub trait MarketPriceServiceTrait: Send + Sync {
    /// All records, newest first.
    fn latest_prices(&self) -> Result<Vec<PriceRecord>>;

    /// Distinct commodity names in first-seen order.
    fn commodities(&self) -> Result<Vec<String>>;

    /// Price history for one commodity, oldest first.
    fn commodity_series(&self, commodity: &str) -> Result<Vec<PricePoint>>;
}
