use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use kisan_ai::flows::{
    AnalyzeCropImage, AnalyzeCropImageOutput, FindGovernmentSchemes, GenerateAdviceOutput,
    GenerateAgriculturalAdvice, GenerateExpertAdvice, PredictMarketPrice,
    PredictMarketPriceOutput, Scheme,
};
use kisan_ai::Flow;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Bodies are taken as raw JSON so that a wrong field type is reported by
/// schema validation, naming the field, instead of as a decode error.
async fn run_flow<F: Flow>(state: &AppState, body: Value) -> ApiResult<F::Output> {
    state
        .invoker
        .invoke_value::<F>(body)
        .await
        .map_err(ApiError::flow::<F>)
}

async fn analyze_crop_image(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<AnalyzeCropImageOutput>> {
    let output = run_flow::<AnalyzeCropImage>(&state, body).await?;
    Ok(Json(output))
}

async fn generate_agricultural_advice(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<GenerateAdviceOutput>> {
    let output = run_flow::<GenerateAgriculturalAdvice>(&state, body).await?;
    Ok(Json(output))
}

async fn generate_expert_advice(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<GenerateAdviceOutput>> {
    let output = run_flow::<GenerateExpertAdvice>(&state, body).await?;
    Ok(Json(output))
}

async fn predict_market_price(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<PredictMarketPriceOutput>> {
    let output = run_flow::<PredictMarketPrice>(&state, body).await?;
    Ok(Json(output))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemesResponse {
    schemes: Vec<Scheme>,
    message: String,
}

async fn find_government_schemes(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<SchemesResponse>> {
    let output = run_flow::<FindGovernmentSchemes>(&state, body).await?;
    let message = output.summary_message();
    Ok(Json(SchemesResponse {
        schemes: output.schemes,
        message,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/flows/crop-analysis", post(analyze_crop_image))
        .route(
            "/flows/agricultural-advice",
            post(generate_agricultural_advice),
        )
        .route("/flows/expert-advice", post(generate_expert_advice))
        .route("/flows/price-prediction", post(predict_market_price))
        .route("/flows/schemes", post(find_government_schemes))
}
