use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EmbeddingProvider;
use crate::error::{VectorStoreError, VectorStoreResult};
use crate::models::{EmbeddingModel, EmbeddingResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Inputs per `/embeddings` request; larger batches are split.
const MAX_INPUTS_PER_REQUEST: usize = 512;

/// OpenAI embedding provider configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: EmbeddingModel,
    /// Shortened output length, `text-embedding-3-*` only
    pub dimensions: Option<u32>,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: EmbeddingModel::default(),
            dimensions: None,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: EmbeddingModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Effective vector length
    pub fn dimension(&self) -> u32 {
        self.dimensions.unwrap_or_else(|| self.model.dimension())
    }
}

impl FromEnv for OpenAIConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("OPENAI_API_KEY")?;
        let base_url = env_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL);

        let model_name = env_or_default(
            "OPENAI_EMBEDDING_MODEL",
            EmbeddingModel::default().model_name(),
        );
        let model = model_name
            .parse::<EmbeddingModel>()
            .map_err(|e| ConfigError::ParseError {
                key: "OPENAI_EMBEDDING_MODEL".to_string(),
                details: e.to_string(),
            })?;

        let dimensions = env_optional("OPENAI_EMBEDDING_DIMENSIONS")
            .map(|raw| {
                raw.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|d| *d > 0)
                    .ok_or_else(|| ConfigError::ParseError {
                        key: "OPENAI_EMBEDDING_DIMENSIONS".to_string(),
                        details: format!("expected a positive integer, got '{}'", raw),
                    })
            })
            .transpose()?;

        if dimensions.is_some() && !model.supports_shortening() {
            return Err(ConfigError::ParseError {
                key: "OPENAI_EMBEDDING_DIMENSIONS".to_string(),
                details: format!("{} does not accept a dimensions override", model),
            });
        }

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimensions,
        })
    }
}

/// OpenAI embeddings provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    usage: EmbeddingUsage,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingUsage {
    total_tokens: u32,
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn model(&self) -> EmbeddingModel {
        self.config.model
    }

    fn dimension(&self) -> u32 {
        self.config.dimension()
    }

    async fn embed(&self, text: &str) -> VectorStoreResult<EmbeddingResult> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| VectorStoreError::Embedding("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> VectorStoreResult<Vec<EmbeddingResult>> {
        let mut results = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_INPUTS_PER_REQUEST) {
            results.extend(self.embed_chunk(chunk).await?);
        }
        Ok(results)
    }
}

impl OpenAIProvider {
    /// One `/embeddings` call; results come back in input order.
    async fn embed_chunk(&self, texts: &[String]) -> VectorStoreResult<Vec<EmbeddingResult>> {
        let request = EmbeddingRequest {
            model: self.config.model.model_name(),
            input: texts,
            dimensions: self.config.dimensions,
        };

        debug!(model = %self.config.model, count = texts.len(), "Requesting embeddings");

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::Embedding(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await?;

        if embedding_response.data.len() != texts.len() {
            return Err(VectorStoreError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embedding_response.data.len()
            )));
        }

        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);

        let tokens_per_embedding = embedding_response.usage.total_tokens / texts.len() as u32;

        Ok(data
            .into_iter()
            .map(|d| EmbeddingResult {
                dimension: d.embedding.len() as u32,
                values: d.embedding,
                tokens_used: tokens_per_embedding,
            })
            .collect())
    }
}
