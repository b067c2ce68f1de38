use async_trait::async_trait;

use crate::error::VectorStoreResult;
use crate::models::{EmbeddingModel, EmbeddingResult};

/// Trait for embedding generation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// The model every call is made with
    fn model(&self) -> EmbeddingModel;

    /// Length of the vectors this provider returns
    fn dimension(&self) -> u32;

    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> VectorStoreResult<EmbeddingResult>;

    /// Generate embeddings for multiple texts in one request, in input order
    async fn embed_batch(&self, texts: &[String]) -> VectorStoreResult<Vec<EmbeddingResult>>;
}
