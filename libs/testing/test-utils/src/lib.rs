//! Shared test utilities for the vector store crates
//!
//! - `InMemoryVectorStore`: `VectorStoreRepository` backed by a `HashMap`, with
//!   cosine ranking and keyword filters (always available)
//! - `StubEmbeddingProvider`: deterministic bag-of-words embeddings, no network
//!   (always available)
//! - `TestQdrant`: Qdrant container with automatic cleanup (feature: "qdrant")
//! - `TestDataBuilder`: deterministic collection names (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use domain_vector_store::VectorStoreService;
//! use test_utils::{InMemoryVectorStore, StubEmbeddingProvider};
//!
//! let store = InMemoryVectorStore::new();
//! let embeddings = Arc::new(StubEmbeddingProvider::new(8));
//! let service = VectorStoreService::new(store.clone(), embeddings);
//! ```
//!
//! ## Qdrant Testing
//!
//! Add `features = ["qdrant"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["qdrant"] }
//! ```

mod embedding;
mod memory;

#[cfg(feature = "qdrant")]
mod qdrant;

pub use embedding::StubEmbeddingProvider;
pub use memory::InMemoryVectorStore;

#[cfg(feature = "qdrant")]
pub use qdrant::TestQdrant;

/// Builder for test data with deterministic names
///
/// Tests sharing one Qdrant instance each get their own collections.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed is the hash of the name)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_search_documents");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Collection name unique to this builder, e.g. `test-articles-12345`
    pub fn index_name(&self, prefix: &str) -> String {
        format!("test-{}-{}", prefix, self.seed)
    }
}
