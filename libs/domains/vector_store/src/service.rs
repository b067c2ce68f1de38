use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::error::{VectorStoreError, VectorStoreResult};
use crate::models::{CollectionDescriptor, Document, MetadataFilter, VectorRecord};
use crate::repository::VectorStoreRepository;

/// Store adapter: embeds text and proxies each operation onto the repository.
///
/// Holds no per-collection state; every call rebuilds its view from the
/// `CollectionDescriptor` it is given.
pub struct VectorStoreService<R: VectorStoreRepository> {
    repository: R,
    embedding_provider: Arc<dyn EmbeddingProvider>,
}

impl<R: VectorStoreRepository> VectorStoreService<R> {
    pub fn new(repository: R, embedding_provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            repository,
            embedding_provider,
        }
    }

    /// Make sure the collection exists, sized for the configured model.
    pub async fn create_vector_store(
        &self,
        collection: &CollectionDescriptor,
    ) -> VectorStoreResult<String> {
        collection.validate()?;

        let created = self
            .repository
            .ensure_collection(&collection.index_name, self.embedding_provider.dimension())
            .await?;

        info!(
            index = %collection.index_name,
            model = %self.embedding_provider.model(),
            created,
            "Vector store ready"
        );
        Ok(format!(
            "Vector store [{}] created successfully.",
            collection.index_name
        ))
    }

    /// Embed all documents in one batch and write them in a single upsert.
    ///
    /// A document's `uuid` metadata becomes its point id; one is generated when
    /// missing or not a UUID.
    pub async fn create_vector_store_and_add_documents(
        &self,
        collection: &CollectionDescriptor,
        documents: Vec<Document>,
    ) -> VectorStoreResult<String> {
        collection.validate()?;

        let message = format!(
            "Vector store [{}] created and documents added successfully.",
            collection.index_name
        );

        if documents.is_empty() {
            info!(index = %collection.index_name, "No documents to add");
            return Ok(message);
        }

        let texts: Vec<String> = documents.iter().map(|d| d.page_content.clone()).collect();
        let embeddings = self.embedding_provider.embed_batch(&texts).await?;

        if embeddings.len() != documents.len() {
            return Err(VectorStoreError::Embedding(format!(
                "Expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let dimension = embeddings[0].dimension;
        self.repository
            .ensure_collection(&collection.index_name, dimension)
            .await?;

        let records: Vec<VectorRecord> = documents
            .into_iter()
            .zip(embeddings)
            .map(|(mut document, embedding)| {
                let id = match document.id().and_then(|id| Uuid::parse_str(id).ok()) {
                    Some(id) => id,
                    None => document.assign_id(),
                };
                VectorRecord {
                    id,
                    vector: embedding.values,
                    document,
                }
            })
            .collect();

        let count = records.len();
        self.repository.upsert(collection, records).await?;

        info!(index = %collection.index_name, count, "Documents added");
        Ok(message)
    }

    pub async fn search_documents(
        &self,
        query: &str,
        k: u32,
        collection: &CollectionDescriptor,
    ) -> VectorStoreResult<Vec<Document>> {
        self.search(query, k, None, collection).await
    }

    /// Like `search_documents`, keeping only exact `filter.key == filter.value` hits.
    pub async fn search_documents_with_filter(
        &self,
        query: &str,
        k: u32,
        filter: MetadataFilter,
        collection: &CollectionDescriptor,
    ) -> VectorStoreResult<Vec<Document>> {
        filter.validate()?;
        self.search(query, k, Some(filter), collection).await
    }

    pub async fn delete_document(
        &self,
        collection: &CollectionDescriptor,
        id: &str,
    ) -> VectorStoreResult<String> {
        collection.validate()?;
        if id.trim().is_empty() {
            return Err(VectorStoreError::validation("id is required"));
        }

        self.repository.delete(collection, id).await?;

        info!(index = %collection.index_name, id = %id, "Document deleted");
        Ok(format!("Document with id {} deleted successfully.", id))
    }

    async fn search(
        &self,
        query: &str,
        k: u32,
        filter: Option<MetadataFilter>,
        collection: &CollectionDescriptor,
    ) -> VectorStoreResult<Vec<Document>> {
        collection.validate()?;
        if query.trim().is_empty() {
            return Err(VectorStoreError::validation("query is required"));
        }
        if k == 0 {
            return Err(VectorStoreError::validation("k must be greater than zero"));
        }

        let embedding = self.embedding_provider.embed(query).await?;
        let hits = self
            .repository
            .search(collection, embedding.values, k, filter.clone())
            .await?;

        let documents: Vec<Document> = hits
            .into_iter()
            .map(|hit| hit.document)
            .filter(|doc| filter.as_ref().is_none_or(|f| f.matches(doc)))
            .take(k as usize)
            .map(|doc| collection.project(doc))
            .collect();

        info!(
            index = %collection.index_name,
            k,
            filtered = filter.is_some(),
            returned = documents.len(),
            "Search completed"
        );
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;
    use crate::models::{DOCUMENT_ID_KEY, EmbeddingModel, EmbeddingResult, ScoredDocument};
    use crate::repository::MockVectorStoreRepository;
    use mockall::predicate::{always, eq};

    fn collection(keys: &[&str]) -> CollectionDescriptor {
        CollectionDescriptor::new(
            "Articles",
            "text",
            keys.iter().map(|k| k.to_string()).collect(),
        )
    }

    fn embedding(values: Vec<f32>) -> EmbeddingResult {
        EmbeddingResult {
            dimension: values.len() as u32,
            values,
            tokens_used: 1,
        }
    }

    fn hit(id: &str, content: &str, metadata: &[(&str, &str)]) -> ScoredDocument {
        let mut document = Document::new(content).with_metadata(DOCUMENT_ID_KEY, id);
        for (k, v) in metadata {
            document = document.with_metadata(*k, *v);
        }
        ScoredDocument {
            id: id.to_string(),
            score: 0.9,
            document,
        }
    }

    fn query_embedder() -> MockEmbeddingProvider {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .returning(|_| Ok(embedding(vec![0.1_f32, 0.2, 0.3])));
        embedder
    }

    #[tokio::test]
    async fn test_create_vector_store_ensures_collection_with_model_dimension() {
        let mut repo = MockVectorStoreRepository::new();
        repo.expect_ensure_collection()
            .with(eq("Articles"), eq(3072_u32))
            .times(1)
            .returning(|_, _| Ok(true));

        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_dimension().return_const(3072_u32);
        embedder
            .expect_model()
            .return_const(EmbeddingModel::TextEmbedding3Large);

        let service = VectorStoreService::new(repo, Arc::new(embedder));
        let message = service.create_vector_store(&collection(&[])).await.unwrap();

        assert_eq!(message, "Vector store [Articles] created successfully.");
    }

    #[tokio::test]
    async fn test_create_vector_store_rejects_empty_index_name() {
        let service = VectorStoreService::new(
            MockVectorStoreRepository::new(),
            Arc::new(MockEmbeddingProvider::new()),
        );

        let err = service
            .create_vector_store(&CollectionDescriptor::new("", "text", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, VectorStoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_documents_embeds_once_and_upserts_once() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed_batch()
            .withf(|texts: &[String]| texts == ["first", "second"])
            .times(1)
            .returning(|texts| Ok(texts.iter().map(|_| embedding(vec![1.0, 0.0])).collect()));

        let mut repo = MockVectorStoreRepository::new();
        repo.expect_ensure_collection()
            .with(eq("Articles"), eq(2_u32))
            .times(1)
            .returning(|_, _| Ok(false));
        repo.expect_upsert()
            .withf(|collection, records| {
                collection.index_name == "Articles"
                    && records.len() == 2
                    && records
                        .iter()
                        .all(|r| r.document.id() == Some(r.id.to_string().as_str()))
                    && records[0].id != records[1].id
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = VectorStoreService::new(repo, Arc::new(embedder));
        let documents = vec![
            Document::new("first").with_metadata("source", "a"),
            Document::new("second"),
        ];

        let message = service
            .create_vector_store_and_add_documents(&collection(&[]), documents)
            .await
            .unwrap();

        assert_eq!(
            message,
            "Vector store [Articles] created and documents added successfully."
        );
    }

    #[tokio::test]
    async fn test_add_documents_keeps_assigned_uuid_as_point_id() {
        let id = Uuid::new_v4();

        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed_batch()
            .returning(|texts| Ok(texts.iter().map(|_| embedding(vec![1.0])).collect()));

        let mut repo = MockVectorStoreRepository::new();
        repo.expect_ensure_collection().returning(|_, _| Ok(true));
        repo.expect_upsert()
            .withf(move |_, records| records[0].id == id)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = VectorStoreService::new(repo, Arc::new(embedder));
        let documents = vec![Document::new("text").with_metadata(DOCUMENT_ID_KEY, id.to_string())];

        service
            .create_vector_store_and_add_documents(&collection(&[]), documents)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_empty_documents_makes_no_external_calls() {
        // Any call on either mock would panic.
        let service = VectorStoreService::new(
            MockVectorStoreRepository::new(),
            Arc::new(MockEmbeddingProvider::new()),
        );

        let message = service
            .create_vector_store_and_add_documents(&collection(&[]), vec![])
            .await
            .unwrap();

        assert_eq!(
            message,
            "Vector store [Articles] created and documents added successfully."
        );
    }

    #[tokio::test]
    async fn test_add_documents_embedding_failure_writes_nothing() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed_batch()
            .returning(|_| Err(VectorStoreError::Embedding("rate limited".to_string())));

        let service = VectorStoreService::new(MockVectorStoreRepository::new(), Arc::new(embedder));

        let err = service
            .create_vector_store_and_add_documents(&collection(&[]), vec![Document::new("x")])
            .await
            .unwrap_err();

        assert!(matches!(err, VectorStoreError::Embedding(msg) if msg == "rate limited"));
    }

    #[tokio::test]
    async fn test_add_documents_rejects_mismatched_embedding_count() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed_batch()
            .returning(|_| Ok(vec![embedding(vec![1.0])]));

        let service = VectorStoreService::new(MockVectorStoreRepository::new(), Arc::new(embedder));

        let err = service
            .create_vector_store_and_add_documents(
                &collection(&[]),
                vec![Document::new("a"), Document::new("b")],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, VectorStoreError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_search_returns_at_most_k_in_store_order() {
        let mut repo = MockVectorStoreRepository::new();
        repo.expect_search()
            .with(always(), eq(vec![0.1_f32, 0.2, 0.3]), eq(2_u32), eq(None::<MetadataFilter>))
            .times(1)
            .returning(|_, _, _, _| {
                Ok(vec![
                    hit("1", "best", &[]),
                    hit("2", "second", &[]),
                    hit("3", "third", &[]),
                ])
            });

        let service = VectorStoreService::new(repo, Arc::new(query_embedder()));
        let docs = service
            .search_documents("fox", 2, &collection(&[]))
            .await
            .unwrap();

        let contents: Vec<&str> = docs.iter().map(|d| d.page_content.as_str()).collect();
        assert_eq!(contents, vec!["best", "second"]);
    }

    #[tokio::test]
    async fn test_search_projects_metadata_keys() {
        let mut repo = MockVectorStoreRepository::new();
        repo.expect_search().returning(|_, _, _, _| {
            Ok(vec![hit("1", "body", &[("source", "wiki"), ("author", "ann")])])
        });

        let service = VectorStoreService::new(repo, Arc::new(query_embedder()));
        let docs = service
            .search_documents("fox", 5, &collection(&["source"]))
            .await
            .unwrap();

        assert_eq!(docs[0].metadata.len(), 2);
        assert_eq!(docs[0].metadata["source"], "wiki");
        assert_eq!(docs[0].id(), Some("1"));
    }

    #[tokio::test]
    async fn test_search_validates_arguments() {
        let service = VectorStoreService::new(
            MockVectorStoreRepository::new(),
            Arc::new(MockEmbeddingProvider::new()),
        );

        for (query, k) in [("fox", 0), ("", 3), ("   ", 3)] {
            let err = service
                .search_documents(query, k, &collection(&[]))
                .await
                .unwrap_err();
            assert!(matches!(err, VectorStoreError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_search_with_filter_pushes_down_and_post_filters() {
        let filter = MetadataFilter::new("source", "wiki");

        let mut repo = MockVectorStoreRepository::new();
        repo.expect_search()
            .with(always(), always(), eq(3_u32), eq(Some(filter.clone())))
            .times(1)
            .returning(|_, _, _, _| {
                Ok(vec![
                    hit("1", "match", &[("source", "wiki")]),
                    hit("2", "other", &[("source", "blog")]),
                    hit("3", "missing", &[]),
                    hit("4", "also match", &[("source", "wiki")]),
                ])
            });

        let service = VectorStoreService::new(repo, Arc::new(query_embedder()));
        let docs = service
            .search_documents_with_filter("fox", 3, filter, &collection(&[]))
            .await
            .unwrap();

        let contents: Vec<&str> = docs.iter().map(|d| d.page_content.as_str()).collect();
        assert_eq!(contents, vec!["match", "also match"]);
    }

    #[tokio::test]
    async fn test_search_with_filter_rejects_empty_key() {
        let service = VectorStoreService::new(
            MockVectorStoreRepository::new(),
            Arc::new(MockEmbeddingProvider::new()),
        );

        let err = service
            .search_documents_with_filter("fox", 3, MetadataFilter::new("", "x"), &collection(&[]))
            .await
            .unwrap_err();

        assert!(matches!(err, VectorStoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_store_failure_propagates() {
        let mut repo = MockVectorStoreRepository::new();
        repo.expect_search()
            .returning(|_, _, _, _| Err(VectorStoreError::Qdrant("connection refused".to_string())));

        let service = VectorStoreService::new(repo, Arc::new(query_embedder()));
        let err = service
            .search_documents("fox", 3, &collection(&[]))
            .await
            .unwrap_err();

        assert!(matches!(err, VectorStoreError::Qdrant(_)));
    }

    #[tokio::test]
    async fn test_delete_forwards_exact_id() {
        let id = "0b7c1f4e-8a57-4d53-9b0e-2c1c4b7b3f11";

        let mut repo = MockVectorStoreRepository::new();
        repo.expect_delete()
            .withf(move |collection, requested| collection.index_name == "Articles" && requested == id)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = VectorStoreService::new(repo, Arc::new(MockEmbeddingProvider::new()));
        let message = service.delete_document(&collection(&[]), id).await.unwrap();

        assert_eq!(message, format!("Document with id {} deleted successfully.", id));
    }

    #[tokio::test]
    async fn test_delete_rejects_empty_id() {
        let service = VectorStoreService::new(
            MockVectorStoreRepository::new(),
            Arc::new(MockEmbeddingProvider::new()),
        );

        let err = service
            .delete_document(&collection(&[]), "")
            .await
            .unwrap_err();

        assert!(matches!(err, VectorStoreError::Validation(_)));
    }
}
