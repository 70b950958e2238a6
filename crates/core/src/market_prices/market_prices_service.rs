use std::collections::HashSet;
use std::sync::Arc;

use super::market_prices_model::{PricePoint, PriceRecord};
use super::market_prices_traits::{MarketPriceServiceTrait, PriceRecordRepositoryTrait};
use crate::errors::Result;

pub struct MarketPriceService {
    repository: Arc<dyn PriceRecordRepositoryTrait>,
}

impl MarketPriceService {
    pub fn new(repository: Arc<dyn PriceRecordRepositoryTrait>) -> Self {
        MarketPriceService { repository }
    }
}

impl MarketPriceServiceTrait for MarketPriceService {
    fn latest_prices(&self) -> Result<Vec<PriceRecord>> {
        let mut records = self.repository.load_all()?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    fn commodities(&self) -> Result<Vec<String>> {
        let records = self.repository.load_all()?;
        let mut seen = HashSet::new();
        Ok(records
            .into_iter()
            .filter_map(|r| seen.insert(r.commodity.clone()).then_some(r.commodity))
            .collect())
    }

    fn commodity_series(&self, commodity: &str) -> Result<Vec<PricePoint>> {
        let records = self.repository.load_all()?;
        let mut series: Vec<PricePoint> = records
            .iter()
            .filter(|r| r.commodity == commodity)
            .map(PricePoint::from)
            .collect();
        series.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedRepository(Vec<PriceRecord>);

    impl PriceRecordRepositoryTrait for FixedRepository {
        fn load_all(&self) -> Result<Vec<PriceRecord>> {
            Ok(self.0.clone())
        }
    }

    fn record(commodity: &str, price: f64, market: &str, date: &str) -> PriceRecord {
        PriceRecord {
            commodity: commodity.to_string(),
            price,
            market: market.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn service() -> MarketPriceService {
        MarketPriceService::new(Arc::new(FixedRepository(vec![
            record("Wheat", 2250.0, "Azadpur", "2025-07-18"),
            record("Onion", 2900.0, "Lasalgaon", "2025-07-20"),
            record("Wheat", 2310.0, "Azadpur", "2025-07-21"),
            record("Wheat", 2280.0, "Khanna", "2025-07-19"),
        ])))
    }

    #[test]
    fn test_latest_prices_newest_first() {
        let dates: Vec<String> = service()
            .latest_prices()
            .unwrap()
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(
            dates,
            vec!["2025-07-21", "2025-07-20", "2025-07-19", "2025-07-18"]
        );
    }

    #[test]
    fn test_commodities_first_seen_order() {
        assert_eq!(service().commodities().unwrap(), vec!["Wheat", "Onion"]);
    }

    #[test]
    fn test_commodity_series_oldest_first() {
        let series = service().commodity_series("Wheat").unwrap();
        let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![2250.0, 2280.0, 2310.0]);
    }

    #[test]
    fn test_unknown_commodity_has_empty_series() {
        assert!(service().commodity_series("Saffron").unwrap().is_empty());
    }
}
