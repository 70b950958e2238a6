//! Environment abstraction for provider credentials.
//!
//! Providers never read the process environment directly; they ask an
//! `AiEnvironment`. The server passes [`ProcessEnvironment`], tests pass a
//! fixed map.

/// Source of secrets such as API keys.
pub trait AiEnvironment: Send + Sync {
    /// Look up a secret by its environment key. Blank values count as absent.
    fn secret(&self, key: &str) -> Option<String>;
}

/// Reads secrets from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl AiEnvironment for ProcessEnvironment {
    fn secret(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
