//! Provider catalog and client factory.
//!
//! The catalog is an embedded JSON document listing each supported provider
//! with its wire protocol, default endpoint, default model and the
//! environment keys its API key may be read from.

pub mod fake;
pub mod gemini;
pub mod openai_compatible;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::env::AiEnvironment;
use crate::error::AiError;
use crate::model_provider::ModelProvider;

pub use fake::{FakeModelProvider, FakeReply};
pub use gemini::GeminiProvider;
pub use openai_compatible::OpenAiCompatibleProvider;

// ============================================================================
// Provider Catalog (Static JSON)
// ============================================================================

/// Static provider catalog loaded from embedded JSON.
static PROVIDER_CATALOG: Lazy<ProviderCatalog> = Lazy::new(|| {
    let json = include_str!("kisan_providers.json");
    serde_json::from_str(json).expect("Failed to parse kisan_providers.json")
});

#[derive(Debug, Deserialize)]
struct ProviderCatalog {
    providers: HashMap<String, ProviderCatalogEntry>,
}

/// Wire protocol spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderType {
    Gemini,
    OpenaiCompatible,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderCatalogEntry {
    name: String,
    #[serde(rename = "type")]
    provider_type: ProviderType,
    description: String,
    #[serde(default)]
    env_keys: Vec<String>,
    default_base_url: String,
    default_model: String,
    #[serde(default)]
    supports_vision: bool,
    #[serde(default)]
    documentation_url: Option<String>,
}

/// Public view of a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    pub provider_type: ProviderType,
    pub description: String,
    pub env_keys: Vec<String>,
    pub default_base_url: String,
    pub default_model: String,
    pub supports_vision: bool,
    pub documentation_url: Option<String>,
}

/// All catalog providers, sorted by id.
pub fn provider_catalog() -> Vec<ProviderInfo> {
    let mut providers: Vec<ProviderInfo> = PROVIDER_CATALOG
        .providers
        .iter()
        .map(|(id, entry)| ProviderInfo {
            id: id.clone(),
            name: entry.name.clone(),
            provider_type: entry.provider_type,
            description: entry.description.clone(),
            env_keys: entry.env_keys.clone(),
            default_base_url: entry.default_base_url.clone(),
            default_model: entry.default_model.clone(),
            supports_vision: entry.supports_vision,
            documentation_url: entry.documentation_url.clone(),
        })
        .collect();
    providers.sort_by(|a, b| a.id.cmp(&b.id));
    providers
}

// ============================================================================
// Provider Factory
// ============================================================================

/// Which provider to build and how.
///
/// `model` and `base_url` fall back to the catalog defaults. No timeout is
/// applied unless one is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    pub provider_id: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl ProviderSettings {
    pub fn new(provider_id: &str) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            ..Default::default()
        }
    }
}

fn catalog_entry(provider_id: &str) -> Result<&'static ProviderCatalogEntry, AiError> {
    PROVIDER_CATALOG
        .providers
        .get(provider_id)
        .ok_or_else(|| AiError::UnknownProvider(provider_id.to_string()))
}

/// Resolve a provider's API key, trying each catalog env key in order.
///
/// Returns `Ok(None)` for providers that need no key.
pub fn resolve_api_key(
    env: &dyn AiEnvironment,
    provider_id: &str,
) -> Result<Option<String>, AiError> {
    let entry = catalog_entry(provider_id)?;
    if entry.env_keys.is_empty() {
        return Ok(None);
    }
    entry
        .env_keys
        .iter()
        .find_map(|key| env.secret(key))
        .map(Some)
        .ok_or_else(|| AiError::MissingApiKey(provider_id.to_string()))
}

/// Build the provider named in `settings`.
pub fn build_provider(
    env: &dyn AiEnvironment,
    settings: &ProviderSettings,
) -> Result<Arc<dyn ModelProvider>, AiError> {
    let entry = catalog_entry(&settings.provider_id)?;
    let api_key = resolve_api_key(env, &settings.provider_id)?;

    let model = non_blank(settings.model.as_deref()).unwrap_or(entry.default_model.as_str());
    let base_url =
        non_blank(settings.base_url.as_deref()).unwrap_or(entry.default_base_url.as_str());
    let client = http_client(settings.timeout)?;

    info!(
        "Using AI provider {} with model {} at {}",
        settings.provider_id, model, base_url
    );
    if !entry.supports_vision {
        warn!(
            "AI provider {} does not accept images; crop image analysis will fail",
            settings.provider_id
        );
    }

    let provider: Arc<dyn ModelProvider> = match entry.provider_type {
        ProviderType::Gemini => {
            let api_key = api_key
                .ok_or_else(|| AiError::MissingApiKey(settings.provider_id.clone()))?;
            Arc::new(GeminiProvider::new(client, base_url, model, api_key))
        }
        ProviderType::OpenaiCompatible => Arc::new(OpenAiCompatibleProvider::new(
            &settings.provider_id,
            client,
            base_url,
            model,
            api_key,
        )),
    };
    Ok(provider)
}

fn http_client(timeout: Option<Duration>) -> Result<Client, AiError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        debug!("Provider request timeout set to {:?}", timeout);
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| AiError::internal(format!("Failed to build HTTP client: {}", e)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
