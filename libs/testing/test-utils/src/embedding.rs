use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use domain_vector_store::{
    EmbeddingModel, EmbeddingProvider, EmbeddingResult, VectorStoreError, VectorStoreResult,
};

/// Deterministic embeddings for tests.
///
/// Each lowercase word is hashed into one of `dimension` buckets and the
/// counts are L2-normalized, so texts sharing words land close together.
#[derive(Clone)]
pub struct StubEmbeddingProvider {
    dimension: u32,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StubEmbeddingProvider {
    pub fn new(dimension: u32) -> Self {
        Self {
            dimension: dimension.max(1),
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every call fails with `VectorStoreError::Embedding(message)`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of `embed` / `embed_batch` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut values = vec![0.0_f32; self.dimension as usize];
        for word in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            values[(hasher.finish() % self.dimension as u64) as usize] += 1.0;
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }
        values
    }

    fn result(&self, text: &str) -> EmbeddingResult {
        EmbeddingResult {
            values: self.vectorize(text),
            dimension: self.dimension,
            tokens_used: text.split_whitespace().count() as u32,
        }
    }

    fn record_call(&self) -> VectorStoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(VectorStoreError::Embedding(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddingProvider {
    fn model(&self) -> EmbeddingModel {
        EmbeddingModel::default()
    }

    fn dimension(&self) -> u32 {
        self.dimension
    }

    async fn embed(&self, text: &str) -> VectorStoreResult<EmbeddingResult> {
        self.record_call()?;
        Ok(self.result(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> VectorStoreResult<Vec<EmbeddingResult>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        self.record_call()?;
        Ok(texts.iter().map(|t| self.result(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_text_same_vector() {
        let provider = StubEmbeddingProvider::new(16);

        let a = provider.embed("quick brown fox").await.unwrap();
        let b = provider.embed("Quick Brown Fox").await.unwrap();

        assert_eq!(a.values, b.values);
        assert_eq!(a.dimension, 16);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = StubEmbeddingProvider::new(4).failing("quota exceeded");

        let err = provider.embed("x").await.unwrap_err();
        assert!(matches!(err, VectorStoreError::Embedding(msg) if msg == "quota exceeded"));
    }
}
