use std::sync::Arc;

use anyhow::Context;
use kisan_ai::{build_provider, FlowInvoker, ModelProvider, ProcessEnvironment};
use kisan_core::market_prices::{
    JsonPriceRecordRepository, MarketPriceService, MarketPriceServiceTrait,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub invoker: FlowInvoker,
    pub price_service: Arc<dyn MarketPriceServiceTrait>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Build state with the provider named in `config`, reading its API key
/// from the process environment.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = build_provider(&ProcessEnvironment, &config.provider_settings())
        .with_context(|| format!("Failed to configure AI provider '{}'", config.ai_provider))?;
    Ok(build_state_with_provider(config, provider))
}

pub fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn ModelProvider>,
) -> Arc<AppState> {
    tracing::info!(
        provider = provider.id(),
        model = provider.model(),
        prices = %config.price_data_path.display(),
        "Building application state"
    );
    let repository = Arc::new(JsonPriceRecordRepository::new(config.price_data_path.clone()));
    Arc::new(AppState {
        invoker: FlowInvoker::new(provider),
        price_service: Arc::new(MarketPriceService::new(repository)),
    })
}
