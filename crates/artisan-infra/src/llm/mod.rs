//! LLM provider implementations.
//!
//! Contains the Anthropic implementation of the [`LlmProvider`] trait
//! defined in `artisan-core`, plus a factory that resolves the API key and
//! wraps the provider in a [`BoxLlmProvider`].
//!
//! [`LlmProvider`]: artisan_core::llm::provider::LlmProvider

pub mod anthropic;

use secrecy::SecretString;

use artisan_core::llm::box_provider::BoxLlmProvider;
use artisan_types::llm::LlmError;

use self::anthropic::AnthropicProvider;

/// Environment variable holding the Anthropic API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Environment variable overriding the Anthropic base URL.
pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";

/// Read the API key from the environment.
///
/// A missing or blank variable is an authentication failure so callers can
/// report it the same way as a rejected key.
pub fn api_key_from_env() -> Result<SecretString, LlmError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim().to_string())),
        _ => Err(LlmError::AuthenticationFailed),
    }
}

/// Create the assist provider.
///
/// `base_url` overrides the public API endpoint (proxies, local gateways).
pub fn create_provider(api_key: SecretString, base_url: Option<&str>) -> BoxLlmProvider {
    let mut provider = AnthropicProvider::new(api_key);
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        tracing::info!(base_url = url, "using custom Anthropic base URL");
        provider = provider.with_base_url(url);
    }
    BoxLlmProvider::new(provider)
}
