use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{VectorStoreError, VectorStoreResult};

/// Metadata key holding the server-generated document identifier.
pub const DOCUMENT_ID_KEY: &str = "uuid";

/// A unit of text plus string metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The `uuid` metadata entry, if present.
    pub fn id(&self) -> Option<&str> {
        self.metadata.get(DOCUMENT_ID_KEY).map(String::as_str)
    }

    /// Overwrite the `uuid` metadata entry with a fresh UUID v4 and return it.
    pub fn assign_id(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.metadata
            .insert(DOCUMENT_ID_KEY.to_string(), id.to_string());
        id
    }
}

/// Transient view of a collection, rebuilt on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionDescriptor {
    pub index_name: String,
    /// Payload field that holds `page_content`.
    pub text_key: String,
    /// Metadata fields returned by searches; empty means all of them.
    pub metadata_keys: Vec<String>,
}

impl CollectionDescriptor {
    pub fn new(
        index_name: impl Into<String>,
        text_key: impl Into<String>,
        metadata_keys: Vec<String>,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            text_key: text_key.into(),
            metadata_keys,
        }
    }

    pub fn validate(&self) -> VectorStoreResult<()> {
        if self.index_name.trim().is_empty() {
            return Err(VectorStoreError::validation("index_name is required"));
        }
        if self.text_key.trim().is_empty() {
            return Err(VectorStoreError::validation("text_key is required"));
        }
        if self.text_key == DOCUMENT_ID_KEY {
            return Err(VectorStoreError::validation(format!(
                "text_key must not be '{}'",
                DOCUMENT_ID_KEY
            )));
        }
        Ok(())
    }

    /// Restrict metadata to the declared keys. `uuid` is always kept.
    pub fn project(&self, mut document: Document) -> Document {
        if !self.metadata_keys.is_empty() {
            document.metadata.retain(|key, _| {
                key == DOCUMENT_ID_KEY || self.metadata_keys.iter().any(|k| k == key)
            });
        }
        document
    }
}

/// Exact-match equality predicate on one metadata field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFilter {
    pub key: String,
    pub value: String,
}

impl MetadataFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn validate(&self) -> VectorStoreResult<()> {
        if self.key.trim().is_empty() {
            return Err(VectorStoreError::validation("filter_key is required"));
        }
        Ok(())
    }

    pub fn matches(&self, document: &Document) -> bool {
        document
            .metadata
            .get(&self.key)
            .is_some_and(|v| *v == self.value)
    }
}

/// A document ready to be written: its point id and embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub document: Document,
}

/// A search hit in store ranking order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub id: String,
    pub score: f32,
    pub document: Document,
}

/// OpenAI embedding models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingModel {
    /// text-embedding-3-small (1536 dimensions)
    TextEmbedding3Small,
    /// text-embedding-3-large (3072 dimensions)
    #[default]
    TextEmbedding3Large,
    /// text-embedding-ada-002 (1536 dimensions, legacy)
    TextEmbeddingAda002,
}

impl EmbeddingModel {
    pub fn dimension(&self) -> u32 {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
        }
    }

    pub fn model_name(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
        }
    }

    /// Whether the API accepts a `dimensions` override for this model.
    pub fn supports_shortening(&self) -> bool {
        !matches!(self, EmbeddingModel::TextEmbeddingAda002)
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

impl FromStr for EmbeddingModel {
    type Err = VectorStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text-embedding-3-small" => Ok(EmbeddingModel::TextEmbedding3Small),
            "text-embedding-3-large" => Ok(EmbeddingModel::TextEmbedding3Large),
            "text-embedding-ada-002" => Ok(EmbeddingModel::TextEmbeddingAda002),
            other => Err(VectorStoreError::Config(format!(
                "Unsupported embedding model: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
    pub tokens_used: u32,
}
