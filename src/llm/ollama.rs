//! Ollama text generation backend.

use super::TextGenerator;
use crate::error::{Result, TubeqaError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout for Ollama API requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for a local Ollama server.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Combine a prompt with an optional context block.
fn build_full_prompt(prompt: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!("Context: {context}\n\nQuestion: {prompt}\n\nAnswer:"),
        None => prompt.to_string(),
    }
}

impl OllamaClient {
    /// Create a client for the given Ollama base URL and model.
    pub fn new(base_url: &str, model: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TubeqaError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate_response(
        &self,
        prompt: &str,
        context: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<String> {
        let full_prompt = build_full_prompt(prompt, context);

        let mut options = serde_json::Map::new();
        if let Some(max_tokens) = max_tokens {
            options.insert("num_predict".to_string(), json!(max_tokens));
        }

        let payload = json!({
            "model": self.model,
            "prompt": full_prompt,
            "stream": false,
            "options": options,
        });

        debug!("Sending generation request to Ollama model {}", self.model);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TubeqaError::Llm(format!("Ollama request timed out at {}", self.base_url))
                } else {
                    TubeqaError::Llm(format!("Ollama request failed: {e}"))
                }
            })?
            .error_for_status()
            .map_err(|e| TubeqaError::Llm(format!("Ollama HTTP error: {e}")))?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TubeqaError::Llm(format!("Invalid Ollama response: {e}")))?;

        let text = body.response.trim().to_string();
        info!("Ollama generated {} characters", text.len());
        Ok(text)
    }

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let payload = json!({
            "model": self.model,
            "prompt": text,
        });

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| TubeqaError::Llm(format!("Ollama embeddings request failed: {e}")))?
            .error_for_status()
            .map_err(|e| TubeqaError::Llm(format!("Ollama embeddings HTTP error: {e}")))?;

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| TubeqaError::Llm(format!("Invalid Ollama embedding response: {e}")))?;

        if body.embedding.is_empty() {
            return Err(TubeqaError::Llm("No embedding returned from Ollama".to_string()));
        }

        debug!("Generated embedding with {} dimensions", body.embedding.len());
        Ok(body.embedding)
    }

    async fn health_check(&self) -> bool {
        let tags: TagsResponse = match self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => match response.json().await {
                Ok(tags) => tags,
                Err(e) => {
                    warn!("Ollama health check failed to parse tags: {}", e);
                    return false;
                }
            },
            Err(e) => {
                warn!("Ollama health check failed: {}", e);
                return false;
            }
        };

        let model_available = tags.models.iter().any(|m| m.name.contains(&self.model));
        if !model_available {
            let names: Vec<&str> = tags.models.iter().map(|m| m.name.as_str()).collect();
            warn!("Model {} not found. Available models: {:?}", self.model, names);
            return false;
        }

        // Probe an actual generation; a loaded tag alone does not prove the
        // model can answer.
        match self.generate_response("Hello", None, Some(10)).await {
            Ok(text) => !text.is_empty(),
            Err(e) => {
                warn!("Ollama health check generation failed: {}", e);
                false
            }
        }
    }
}
