//! Conversions between proto types and domain models.

use rpc::vectorstore::{
    AddDocumentsRequest, CreateVectorStoreRequest, DeleteDocumentRequest,
    Document as ProtoDocument, MessageResponse, SearchDocumentsRequest, SearchDocumentsResponse,
    SearchDocumentsWithFilterRequest,
};

use crate::models::{CollectionDescriptor, Document, MetadataFilter};

/// Requests that carry the `index_name` / `text_key` / `metadata_keys` triple.
pub trait CollectionRequest {
    fn collection(&self) -> CollectionDescriptor;
}

macro_rules! impl_collection_request {
    ($($request:ty),+ $(,)?) => {
        $(
            impl CollectionRequest for $request {
                fn collection(&self) -> CollectionDescriptor {
                    CollectionDescriptor::new(
                        self.index_name.clone(),
                        self.text_key.clone(),
                        self.metadata_keys.clone(),
                    )
                }
            }
        )+
    };
}

impl_collection_request!(
    CreateVectorStoreRequest,
    AddDocumentsRequest,
    SearchDocumentsRequest,
    SearchDocumentsWithFilterRequest,
    DeleteDocumentRequest,
);

impl From<ProtoDocument> for Document {
    fn from(proto: ProtoDocument) -> Self {
        Self {
            page_content: proto.page_content,
            metadata: proto.metadata,
        }
    }
}

impl From<Document> for ProtoDocument {
    fn from(doc: Document) -> Self {
        Self {
            page_content: doc.page_content,
            metadata: doc.metadata,
        }
    }
}

impl From<&SearchDocumentsWithFilterRequest> for MetadataFilter {
    fn from(req: &SearchDocumentsWithFilterRequest) -> Self {
        MetadataFilter::new(req.filter_key.clone(), req.filter_value.clone())
    }
}

pub fn message_response(message: String) -> MessageResponse {
    MessageResponse { message }
}

pub fn search_response(documents: Vec<Document>) -> SearchDocumentsResponse {
    SearchDocumentsResponse {
        documents: documents.into_iter().map(Into::into).collect(),
    }
}
