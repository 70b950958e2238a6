use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use kisan_ai::{provider_catalog, ProviderInfo};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AiProvidersResponse {
    providers: Vec<ProviderInfo>,
    active_provider: String,
    active_model: String,
}

/// The provider catalog plus the provider and model this server is using.
async fn get_ai_providers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AiProvidersResponse>> {
    let provider = state.invoker.provider();
    Ok(Json(AiProvidersResponse {
        providers: provider_catalog(),
        active_provider: provider.id().to_string(),
        active_model: provider.model().to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ai/providers", get(get_ai_providers))
}
