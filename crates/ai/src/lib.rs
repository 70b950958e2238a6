//! Kisan AI - schema-validated LLM flows.
//!
//! Each flow sends one templated prompt (optionally with a crop photo) to a
//! model provider and accepts the reply only if it matches the flow's output
//! schema.
//!
//! # Architecture
//!
//! - `flow`: the `Flow` trait and `FlowInvoker`, the single invocation path
//! - `flows`: crop analysis, the two advice variants, price prediction, schemes
//! - `prompt_template`: `{{{field}}}` / `{{media url=field}}` templates
//! - `model_provider`: the `ModelProvider` trait and reply parsing
//! - `providers`: provider catalog, client factory, Gemini and
//!   OpenAI-compatible adapters, and a fake for tests
//! - `env`: where API keys come from
//! - `eval`: golden-scenario harness (test only)
//!
//! # Example
//!
//! ```ignore
//! use kisan_ai::{build_provider, FlowInvoker, ProcessEnvironment, ProviderSettings};
//! use kisan_ai::flows::{PredictMarketPrice, PredictMarketPriceInput};
//!
//! let provider = build_provider(&ProcessEnvironment, &ProviderSettings::new("gemini"))?;
//! let invoker = FlowInvoker::new(provider);
//!
//! let forecast = invoker
//!     .invoke::<PredictMarketPrice>(&PredictMarketPriceInput {
//!         crop_name: "Wheat".to_string(),
//!     })
//!     .await?;
//! for point in &forecast.price_trend {
//!     println!("{}: {}", point.day, point.price);
//! }
//! ```

pub mod env;
pub mod error;
#[cfg(test)]
pub mod eval;
pub mod flow;
pub mod flows;
pub mod model_provider;
pub mod prompt_template;
pub mod providers;

// Re-export main types for convenience
pub use env::{AiEnvironment, ProcessEnvironment};
pub use error::AiError;
pub use flow::{Flow, FlowInvoker};
pub use model_provider::{GenerateRequest, ModelProvider};
pub use prompt_template::{PromptTemplate, RenderedPrompt};
pub use providers::{
    build_provider, provider_catalog, resolve_api_key, FakeModelProvider, FakeReply,
    ProviderInfo, ProviderSettings, ProviderType,
};
