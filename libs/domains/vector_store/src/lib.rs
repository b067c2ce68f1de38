//! Vector Store Domain Library
//!
//! Store adapter behind the `vectorstore.VectorStoreService` gRPC API. Text is
//! embedded through an [`EmbeddingProvider`] and stored in an external vector
//! database behind [`VectorStoreRepository`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  VectorStoreService  │  ← validation, embedding, post-filtering, projection
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐     ┌───────────────────┐
//! │ VectorStoreRepository│     │ EmbeddingProvider │
//! │       (trait)        │     │      (trait)      │
//! └──────────┬───────────┘     └─────────┬─────────┘
//!            │                           │
//! ┌──────────▼───────────┐     ┌─────────▼─────────┐
//! │   QdrantRepository   │     │  OpenAIProvider   │
//! └──────────────────────┘     └───────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use core_config::FromEnv;
//! use domain_vector_store::{
//!     CollectionDescriptor, Document, OpenAIConfig, OpenAIProvider, QdrantConfig,
//!     QdrantRepository, VectorStoreService,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = QdrantRepository::new(QdrantConfig::from_env()?)?;
//! let embeddings = Arc::new(OpenAIProvider::new(OpenAIConfig::from_env()?));
//! let service = VectorStoreService::new(repository, embeddings);
//!
//! let articles = CollectionDescriptor::new("Articles", "text", vec!["source".into()]);
//! service
//!     .create_vector_store_and_add_documents(
//!         &articles,
//!         vec![Document::new("The quick brown fox").with_metadata("source", "wiki")],
//!     )
//!     .await?;
//!
//! let hits = service.search_documents("fox", 4, &articles).await?;
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod embedding;
pub mod error;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod service;

pub use conversions::CollectionRequest;
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{VectorStoreError, VectorStoreResult};
pub use models::{
    CollectionDescriptor, DOCUMENT_ID_KEY, Document, EmbeddingModel, EmbeddingResult,
    MetadataFilter, ScoredDocument, VectorRecord,
};
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorStoreRepository;
pub use service::VectorStoreService;
