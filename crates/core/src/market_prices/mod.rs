//! Mandi price dashboard data - models, traits, repository and service.

mod market_prices_model;
mod market_prices_repository;
mod market_prices_service;
mod market_prices_traits;

pub use market_prices_model::{PricePoint, PriceRecord};
pub use market_prices_repository::JsonPriceRecordRepository;
pub use market_prices_service::MarketPriceService;
pub use market_prices_traits::{MarketPriceServiceTrait, PriceRecordRepositoryTrait};
