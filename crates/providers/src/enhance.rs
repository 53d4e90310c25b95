//! Enhancement pipeline — ordered model fallback over one provider.
//!
//! The draft is sent to each model identifier in priority order. The first
//! model that returns text wins; a failing model is logged and the next one
//! is tried. Attempts are strictly sequential, so at most one request is in
//! flight and cheaper fallbacks are only spent when needed.

use metaprompt_core::error::{PipelineError, ProviderError};
use metaprompt_core::provider::{AttemptOutcome, GenerationRequest, ModelAttempt, Provider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed instruction sent with every attempt.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert LLM Prompt Engineer and Technical Architect.
YOUR GOAL: Rewrite the input text into a highly optimized \"System Prompt\" for an AI Coding Assistant.

GUIDELINES:
1. Output ONLY Markdown.
2. Do NOT generate code for the app itself. Generate the *instructions* for the app.
3. Enforce Next.js 15 (App Router), React 19, and Tailwind v4.
4. Respect the user's Project Name, Description, Style choice and Color Palette exactly as given in the input.";

/// Sampling settings applied to every attempt.
#[derive(Debug, Clone)]
pub struct EnhancementSettings {
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
}

impl Default for EnhancementSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: None,
        }
    }
}

/// The result of a successful enhancement.
#[derive(Debug, Clone)]
pub struct Enhanced {
    /// Generated document, trimmed
    pub text: String,
    /// The priority-list identifier that produced `text`
    pub used_model: String,
    /// Every attempt made, in order; the last one is the success
    pub attempts: Vec<ModelAttempt>,
}

/// Tries models in order until one produces text.
pub struct EnhancementPipeline {
    provider: Arc<dyn Provider>,
    settings: EnhancementSettings,
}

impl EnhancementPipeline {
    pub fn new(provider: Arc<dyn Provider>, settings: EnhancementSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Enhance `draft`, trying `model_priority` strictly in order.
    ///
    /// The draft itself is never modified; on failure the caller still owns
    /// it unchanged.
    pub async fn enhance(
        &self,
        draft: &str,
        model_priority: &[String],
    ) -> std::result::Result<Enhanced, PipelineError> {
        if model_priority.is_empty() {
            return Err(PipelineError::NoModels);
        }

        let mut attempts = Vec::with_capacity(model_priority.len());
        let mut last_error = None;

        for (i, model) in model_priority.iter().enumerate() {
            info!(
                provider = %self.provider.name(),
                model = %model,
                attempt = i + 1,
                total = model_priority.len(),
                "Enhancement: trying model"
            );

            let request = GenerationRequest {
                model: model.clone(),
                system_instruction: SYSTEM_INSTRUCTION.to_string(),
                user_text: draft.to_string(),
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
            };

            let outcome = match self.provider.generate(request).await {
                Ok(response) if !response.text.trim().is_empty() => Ok(response),
                Ok(_) => Err(ProviderError::EmptyResponse(model.clone())),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(response) => {
                    attempts.push(ModelAttempt {
                        model: model.clone(),
                        outcome: AttemptOutcome::Success,
                    });
                    info!(model = %model, attempts = attempts.len(), "Enhancement: model succeeded");
                    if let Some(usage) = &response.usage {
                        debug!(
                            model = %model,
                            prompt_tokens = usage.prompt_tokens,
                            completion_tokens = usage.completion_tokens,
                            total_tokens = usage.total_tokens,
                            "Enhancement: token usage"
                        );
                    }
                    return Ok(Enhanced {
                        text: response.text.trim().to_string(),
                        used_model: model.clone(),
                        attempts,
                    });
                }
                Err(e) => {
                    warn!(
                        model = %model,
                        error = %e,
                        "Enhancement: model failed, trying next"
                    );
                    attempts.push(ModelAttempt {
                        model: model.clone(),
                        outcome: AttemptOutcome::Failed(e.clone()),
                    });
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error.unwrap_or_else(|| {
            ProviderError::NotConfigured("No models attempted".into())
        });
        Err(PipelineError::Exhausted {
            attempts,
            last_error,
        })
    }
}
