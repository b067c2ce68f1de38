use async_trait::async_trait;

use crate::error::VectorStoreResult;
use crate::models::{CollectionDescriptor, MetadataFilter, ScoredDocument, VectorRecord};

/// Repository trait for the external vector database.
///
/// Collections are addressed by `CollectionDescriptor::index_name`; the
/// descriptor's `text_key` decides where `page_content` lives in the payload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStoreRepository: Send + Sync {
    /// Create the collection if missing. Returns `true` when it was created.
    async fn ensure_collection(&self, collection_name: &str, dimension: u32)
    -> VectorStoreResult<bool>;

    /// Write all records in a single call.
    async fn upsert(
        &self,
        collection: &CollectionDescriptor,
        records: Vec<VectorRecord>,
    ) -> VectorStoreResult<()>;

    /// Nearest neighbours of `vector`, best first, with full metadata.
    async fn search(
        &self,
        collection: &CollectionDescriptor,
        vector: Vec<f32>,
        k: u32,
        filter: Option<MetadataFilter>,
    ) -> VectorStoreResult<Vec<ScoredDocument>>;

    async fn delete(&self, collection: &CollectionDescriptor, id: &str) -> VectorStoreResult<()>;
}
