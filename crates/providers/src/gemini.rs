//! Google Gemini provider implementation.
//!
//! Uses the Generative Language REST API (`models/{model}:generateContent`).
//!
//! Features:
//! - `x-goog-api-key` header authentication
//! - System instruction as the top-level `systemInstruction` field
//! - Per-request timeout on the HTTP client, so every model attempt is bounded

use async_trait::async_trait;
use metaprompt_core::error::ProviderError;
use metaprompt_core::provider::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> std::result::Result<Self, ProviderError> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider whose requests give up after `timeout`.
    pub fn with_timeout(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            timeout,
            client,
        })
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{API_VERSION}/models/{model}:generateContent", self.base_url)
    }

    fn request_body(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: request.system_instruction.clone(),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".into()),
                parts: vec![GeminiPart {
                    text: request.user_text.clone(),
                }],
            }],
            generation_config: GenerationSettings {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }

    /// Map a non-200 status to a provider error.
    fn status_error(status: u16, model: &str, body: &str) -> ProviderError {
        let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());

        match status {
            429 => ProviderError::RateLimited {
                retry_after_secs: 5,
            },
            401 | 403 => ProviderError::AuthenticationFailed(message),
            404 => ProviderError::ModelNotFound(model.to_string()),
            _ => ProviderError::ApiError {
                status_code: status,
                message,
            },
        }
    }

    fn response_to_generation_response(
        model: &str,
        resp: GeminiResponse,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let text: String = resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(model.to_string()));
        }

        let usage = resp.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(GenerationResponse {
            text,
            model: resp.model_version.unwrap_or_else(|| model.to_string()),
            usage,
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let url = self.endpoint(&request.model);
        let body = Self::request_body(&request);

        debug!(provider = "gemini", model = %request.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(format!(
                        "Model '{}' did not answer within {}s",
                        request.model,
                        self.timeout.as_secs()
                    ))
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, model = %request.model, "Gemini API error");
            return Err(Self::status_error(status, &request.model, &error_body));
        }

        let api_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Gemini response: {e}"),
            })?;

        Self::response_to_generation_response(&request.model, api_resp)
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/{API_VERSION}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Ok(response.status().is_success())
    }
}

// --- Gemini API types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GenerationSettings,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let provider = GeminiProvider::new("g-test").unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn constructor_with_base_url() {
        let provider = GeminiProvider::new("g-test")
            .unwrap()
            .with_base_url("https://proxy.example.com/");
        assert_eq!(provider.base_url, "https://proxy.example.com");
        assert_eq!(
            provider.endpoint("gemini-2.5-pro"),
            "https://proxy.example.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let mut request = GenerationRequest::new("gemini-2.5-flash", "Be a prompt engineer", "draft text");
        request.max_output_tokens = Some(2048);
        let body = serde_json::to_value(GeminiProvider::request_body(&request)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be a prompt engineer");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "draft text");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn response_text_joins_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "# System" }, { "text": " Prompt" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14 },
            "modelVersion": "gemini-2.5-pro-001"
        });
        let resp: GeminiResponse = serde_json::from_value(raw).unwrap();
        let out = GeminiProvider::response_to_generation_response("gemini-2.5-pro", resp).unwrap();

        assert_eq!(out.text, "# System Prompt");
        assert_eq!(out.model, "gemini-2.5-pro-001");
        assert_eq!(out.usage.unwrap().total_tokens, 14);
    }

    #[test]
    fn blocked_response_is_empty() {
        let raw = serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        });
        let resp: GeminiResponse = serde_json::from_value(raw).unwrap();
        let err = GeminiProvider::response_to_generation_response("gemini-2.5-pro", resp).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(m) if m == "gemini-2.5-pro"));
    }

    #[test]
    fn status_mapping() {
        let body = r#"{"error":{"code":404,"message":"models/x is not found","status":"NOT_FOUND"}}"#;
        assert!(matches!(
            GeminiProvider::status_error(404, "x", body),
            ProviderError::ModelNotFound(m) if m == "x"
        ));
        assert!(matches!(
            GeminiProvider::status_error(429, "x", ""),
            ProviderError::RateLimited { .. }
        ));
        assert!(matches!(
            GeminiProvider::status_error(403, "x", r#"{"error":{"message":"API key not valid"}}"#),
            ProviderError::AuthenticationFailed(m) if m == "API key not valid"
        ));
        match GeminiProvider::status_error(503, "x", "overloaded") {
            ProviderError::ApiError { status_code, message } => {
                assert_eq!(status_code, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("Expected ApiError, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        let provider = GeminiProvider::with_timeout("g-test", Duration::from_secs(2))
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let err = provider
            .generate(GenerationRequest::new("gemini-2.5-pro", "sys", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Network(_) | ProviderError::Timeout(_)));
    }
}
