//! Text-generation providers and the enhancement pipeline for metaprompt.
//!
//! All providers implement the `metaprompt_core::Provider` trait.
//! [`build_provider`] turns the loaded configuration into a provider, or
//! `None` when no API key is available.

pub mod enhance;
pub mod gemini;

pub use enhance::{Enhanced, EnhancementPipeline, EnhancementSettings};
pub use gemini::GeminiProvider;

use metaprompt_config::AppConfig;
use metaprompt_core::error::ProviderError;
use metaprompt_core::provider::Provider;
use std::sync::Arc;
use std::time::Duration;

/// Build the configured provider. `Ok(None)` means enhancement is unavailable
/// because no API key is set.
pub fn build_provider(
    config: &AppConfig,
) -> std::result::Result<Option<Arc<dyn Provider>>, ProviderError> {
    let Some(api_key) = config.api_key.as_deref() else {
        return Ok(None);
    };

    let timeout = Duration::from_secs(config.generation.request_timeout_secs);
    let provider: Arc<dyn Provider> = Arc::new(
        GeminiProvider::with_timeout(api_key, timeout)?.with_base_url(&config.generation.base_url),
    );

    Ok(Some(provider))
}

/// Pipeline settings taken from `[generation]`.
pub fn settings_from_config(config: &AppConfig) -> EnhancementSettings {
    EnhancementSettings {
        temperature: config.generation.temperature,
        max_output_tokens: Some(config.generation.max_output_tokens),
    }
}
