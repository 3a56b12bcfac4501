//! Text generation backends.

mod ollama;

pub use ollama::OllamaClient;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for language-model backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt, optionally grounded in a context block.
    async fn generate_response(
        &self,
        prompt: &str,
        context: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<String>;

    /// Generate a vector embedding for a text.
    ///
    /// Present as an extension point for future retrieval features; the QA
    /// pipeline does not call it.
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>>;

    /// Whether the backend is reachable and able to generate.
    async fn health_check(&self) -> bool;
}
