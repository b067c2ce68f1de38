use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    self, Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointId,
    PointStruct, SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue,
    VectorParamsBuilder,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::QdrantConfig;
use crate::error::{VectorStoreError, VectorStoreResult};
use crate::models::{CollectionDescriptor, Document, MetadataFilter, ScoredDocument, VectorRecord};
use crate::repository::VectorStoreRepository;

/// Qdrant-backed implementation of VectorStoreRepository
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub fn new(config: QdrantConfig) -> VectorStoreResult<Self> {
        let mut builder = Qdrant::from_url(&config.url());

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| VectorStoreError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }
}

/// Page content under `text_key`, every metadata entry as a string field.
fn document_to_payload(text_key: &str, document: Document) -> HashMap<String, QdrantValue> {
    let mut payload: HashMap<String, QdrantValue> = document
        .metadata
        .into_iter()
        .map(|(key, value)| (key, QdrantValue::from(value)))
        .collect();
    payload.insert(
        text_key.to_string(),
        QdrantValue::from(document.page_content),
    );
    payload
}

fn payload_to_document(text_key: &str, mut payload: HashMap<String, QdrantValue>) -> Document {
    let page_content = payload
        .remove(text_key)
        .and_then(qdrant_value_to_string)
        .unwrap_or_default();

    let metadata = payload
        .into_iter()
        .filter_map(|(key, value)| qdrant_value_to_string(value).map(|v| (key, v)))
        .collect();

    Document {
        page_content,
        metadata,
    }
}

/// Scalars only; numbers and booleans use their JSON text form.
fn qdrant_value_to_string(val: QdrantValue) -> Option<String> {
    use qdrant::value::Kind;

    match val.kind {
        Some(Kind::StringValue(s)) => Some(s),
        Some(Kind::BoolValue(b)) => Some(b.to_string()),
        Some(Kind::IntegerValue(i)) => Some(i.to_string()),
        Some(Kind::DoubleValue(f)) => serde_json::Number::from_f64(f).map(|n| n.to_string()),
        _ => None,
    }
}

fn point_id_to_string(point_id: Option<PointId>) -> VectorStoreResult<String> {
    match point_id.and_then(|p| p.point_id_options) {
        Some(qdrant::point_id::PointIdOptions::Uuid(uuid)) => Ok(uuid),
        Some(qdrant::point_id::PointIdOptions::Num(num)) => Ok(num.to_string()),
        None => Err(VectorStoreError::Internal("Missing point ID".to_string())),
    }
}

fn to_qdrant_filter(filter: &MetadataFilter) -> Filter {
    Filter::must([Condition::matches(
        filter.key.clone(),
        filter.value.clone(),
    )])
}

#[async_trait]
impl VectorStoreRepository for QdrantRepository {
    async fn ensure_collection(
        &self,
        collection_name: &str,
        dimension: u32,
    ) -> VectorStoreResult<bool> {
        if self.client.collection_exists(collection_name).await? {
            debug!(collection = %collection_name, "Collection already exists");
            return Ok(false);
        }

        let created = self
            .client
            .create_collection(
                CreateCollectionBuilder::new(collection_name).vectors_config(
                    VectorParamsBuilder::new(dimension as u64, Distance::Cosine),
                ),
            )
            .await;

        if let Err(err) = created {
            // A concurrent caller may have created it between the check and the create.
            if self.client.collection_exists(collection_name).await? {
                debug!(collection = %collection_name, "Collection created concurrently");
                return Ok(false);
            }
            return Err(err.into());
        }

        info!(collection = %collection_name, dimension, "Created Qdrant collection");
        Ok(true)
    }

    async fn upsert(
        &self,
        collection: &CollectionDescriptor,
        records: Vec<VectorRecord>,
    ) -> VectorStoreResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = records
            .into_iter()
            .map(|record| {
                PointStruct::new(
                    record.id.to_string(),
                    record.vector,
                    document_to_payload(&collection.text_key, record.document),
                )
            })
            .collect();

        let count = points.len();
        self.client
            .upsert_points(UpsertPointsBuilder::new(&collection.index_name, points).wait(true))
            .await?;

        debug!(collection = %collection.index_name, count, "Upserted points");
        Ok(())
    }

    async fn search(
        &self,
        collection: &CollectionDescriptor,
        vector: Vec<f32>,
        k: u32,
        filter: Option<MetadataFilter>,
    ) -> VectorStoreResult<Vec<ScoredDocument>> {
        let mut builder =
            SearchPointsBuilder::new(&collection.index_name, vector, k as u64).with_payload(true);

        if let Some(filter) = &filter {
            builder = builder.filter(to_qdrant_filter(filter));
        }

        let results = self.client.search_points(builder).await?;

        results
            .result
            .into_iter()
            .map(|point| {
                Ok(ScoredDocument {
                    id: point_id_to_string(point.id)?,
                    score: point.score,
                    document: payload_to_document(&collection.text_key, point.payload),
                })
            })
            .collect()
    }

    async fn delete(&self, collection: &CollectionDescriptor, id: &str) -> VectorStoreResult<()> {
        let uuid = Uuid::parse_str(id)
            .map_err(|e| VectorStoreError::validation(format!("Invalid document id '{}': {}", id, e)))?;

        self.client
            .delete_points(
                DeletePointsBuilder::new(&collection.index_name)
                    .points(vec![PointId::from(uuid.to_string())])
                    .wait(true),
            )
            .await?;

        Ok(())
    }
}
