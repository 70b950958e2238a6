use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use kisan_ai::ProviderSettings;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub price_data_path: PathBuf,
    pub ai_provider: String,
    pub ai_model: Option<String>,
    pub ai_base_url: Option<String>,
    /// No timeout unless set.
    pub ai_timeout: Option<Duration>,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            price_data_path: PathBuf::from("data/mock-prices.json"),
            ai_provider: "gemini".to_string(),
            ai_model: None,
            ai_base_url: None,
            ai_timeout: None,
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match optional_var("KISAN_LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid KISAN_LISTEN_ADDR '{}'", addr))?,
            None => defaults.listen_addr,
        };
        let cors_allow = std::env::var("KISAN_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let ai_timeout = match optional_var("KISAN_AI_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(secs.parse().with_context(|| {
                format!("Invalid KISAN_AI_TIMEOUT_SECS '{}'", secs)
            })?)),
            None => None,
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            price_data_path: optional_var("KISAN_PRICE_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.price_data_path),
            ai_provider: optional_var("KISAN_AI_PROVIDER").unwrap_or(defaults.ai_provider),
            ai_model: optional_var("KISAN_AI_MODEL"),
            ai_base_url: optional_var("KISAN_AI_BASE_URL"),
            ai_timeout,
            log_format: optional_var("KISAN_LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            provider_id: self.ai_provider.clone(),
            model: self.ai_model.clone(),
            base_url: self.ai_base_url.clone(),
            timeout: self.ai_timeout,
        }
    }
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
