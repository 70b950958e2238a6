use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use kisan_core::market_prices::{MarketPriceServiceTrait, PricePoint, PriceRecord};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Run a price service call off the async workers; the service reads a file.
async fn with_price_service<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn MarketPriceServiceTrait) -> kisan_core::Result<T> + Send + 'static,
{
    let service = state.price_service.clone();
    let result = tokio::task::spawn_blocking(move || f(service.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("Price task failed: {}", e)))?;
    Ok(result?)
}

/// Mandi prices, newest first. The file is re-read on every request.
async fn list_prices(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PriceRecord>>> {
    let records = with_price_service(&state, |service| service.latest_prices()).await?;
    Ok(Json(records))
}

async fn list_commodities(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let commodities = with_price_service(&state, |service| service.commodities()).await?;
    Ok(Json(commodities))
}

#[derive(Deserialize)]
struct SeriesQuery {
    commodity: String,
}

async fn commodity_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeriesQuery>,
) -> ApiResult<Json<Vec<PricePoint>>> {
    let series =
        with_price_service(&state, move |service| service.commodity_series(&query.commodity))
            .await?;
    Ok(Json(series))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prices", get(list_prices))
        .route("/prices/commodities", get(list_commodities))
        .route("/prices/series", get(commodity_series))
}
