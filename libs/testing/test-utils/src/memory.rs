use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use domain_vector_store::{
    CollectionDescriptor, Document, MetadataFilter, ScoredDocument, VectorRecord,
    VectorStoreError, VectorStoreRepository, VectorStoreResult,
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Collection {
    dimension: u32,
    /// Insertion order; upserting an existing id replaces it in place.
    points: Vec<(Uuid, Vec<f32>, Document)>,
}

/// In-memory stand-in for Qdrant.
///
/// Mirrors the behaviour the service relies on: collections must exist before
/// writes, vectors must match the collection dimension, results are ranked by
/// cosine similarity, and filters are exact keyword matches. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryVectorStore {
    collections: Arc<Mutex<HashMap<String, Collection>>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> VectorStoreResult<MutexGuard<'_, HashMap<String, Collection>>> {
        self.collections
            .lock()
            .map_err(|_| VectorStoreError::Internal("store lock poisoned".to_string()))
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.lock().is_ok_and(|c| c.contains_key(name))
    }

    pub fn dimension(&self, name: &str) -> Option<u32> {
        self.lock().ok()?.get(name).map(|c| c.dimension)
    }

    /// Stored documents with their text under `page_content`, in insertion order.
    pub fn documents(&self, name: &str) -> Vec<Document> {
        self.lock()
            .ok()
            .and_then(|c| {
                c.get(name)
                    .map(|c| c.points.iter().map(|(_, _, d)| d.clone()).collect())
            })
            .unwrap_or_default()
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn not_found(name: &str) -> VectorStoreError {
    VectorStoreError::Qdrant(format!("Collection `{}` doesn't exist!", name))
}

#[async_trait]
impl VectorStoreRepository for InMemoryVectorStore {
    async fn ensure_collection(
        &self,
        collection_name: &str,
        dimension: u32,
    ) -> VectorStoreResult<bool> {
        let mut collections = self.lock()?;
        if collections.contains_key(collection_name) {
            return Ok(false);
        }
        collections.insert(
            collection_name.to_string(),
            Collection {
                dimension,
                points: Vec::new(),
            },
        );
        Ok(true)
    }

    async fn upsert(
        &self,
        collection: &CollectionDescriptor,
        records: Vec<VectorRecord>,
    ) -> VectorStoreResult<()> {
        let mut collections = self.lock()?;
        let stored = collections
            .get_mut(&collection.index_name)
            .ok_or_else(|| not_found(&collection.index_name))?;

        if let Some(bad) = records
            .iter()
            .find(|r| r.vector.len() != stored.dimension as usize)
        {
            return Err(VectorStoreError::Qdrant(format!(
                "Wrong input: Vector dimension error: expected dim: {}, got {}",
                stored.dimension,
                bad.vector.len()
            )));
        }

        for record in records {
            let id = record.id;
            let point = (id, record.vector, record.document);
            match stored.points.iter_mut().find(|(existing, _, _)| *existing == id) {
                Some(existing) => *existing = point,
                None => stored.points.push(point),
            }
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &CollectionDescriptor,
        vector: Vec<f32>,
        k: u32,
        filter: Option<MetadataFilter>,
    ) -> VectorStoreResult<Vec<ScoredDocument>> {
        let collections = self.lock()?;
        let stored = collections
            .get(&collection.index_name)
            .ok_or_else(|| not_found(&collection.index_name))?;

        let mut hits: Vec<ScoredDocument> = stored
            .points
            .iter()
            .filter(|(_, _, doc)| filter.as_ref().is_none_or(|f| f.matches(doc)))
            .map(|(id, values, doc)| ScoredDocument {
                id: id.to_string(),
                score: cosine(&vector, values),
                document: doc.clone(),
            })
            .collect();

        // Stable sort keeps insertion order among equal scores.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k as usize);
        Ok(hits)
    }

    async fn delete(&self, collection: &CollectionDescriptor, id: &str) -> VectorStoreResult<()> {
        let uuid = Uuid::parse_str(id)
            .map_err(|e| VectorStoreError::validation(format!("Invalid document id '{}': {}", id, e)))?;

        let mut collections = self.lock()?;
        let stored = collections
            .get_mut(&collection.index_name)
            .ok_or_else(|| not_found(&collection.index_name))?;
        stored.points.retain(|(point_id, _, _)| *point_id != uuid);
        Ok(())
    }
}
