//! Vector store gRPC service implementation
//!
//! Handlers destructure the request, delegate to the domain `VectorStoreService`
//! and wrap the result. Conversions live in `domain_vector_store::conversions`.

use std::sync::Arc;

use domain_vector_store::conversions::{message_response, search_response};
use domain_vector_store::{
    CollectionRequest, Document, MetadataFilter, VectorStoreError, VectorStoreRepository,
    VectorStoreService,
};
use grpc_server::RequestIdInterceptor;
use rpc::vectorstore::{
    AddDocumentsRequest, CreateVectorStoreRequest, DeleteDocumentRequest, MessageResponse,
    SearchDocumentsRequest, SearchDocumentsResponse, SearchDocumentsWithFilterRequest,
    vector_store_service_server::VectorStoreService as VectorStoreServiceTrait,
};
use tonic::{Request, Response, Status};
use tracing::{error, info};

/// gRPC service implementation for vector store operations
///
/// Generic over the repository type for testability.
pub struct VectorStoreServiceImpl<R>
where
    R: VectorStoreRepository + 'static,
{
    service: Arc<VectorStoreService<R>>,
}

impl<R> VectorStoreServiceImpl<R>
where
    R: VectorStoreRepository + 'static,
{
    pub fn new(service: VectorStoreService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Keep the status code, prefix the message with the RPC name.
fn rpc_failure(method: &str, err: VectorStoreError) -> Status {
    let status = Status::from(err);
    error!(method, code = ?status.code(), error = %status.message(), "gRPC call failed");
    Status::new(
        status.code(),
        format!("Error in gRPC {}: {}", method, status.message()),
    )
}

fn request_id<T>(request: &Request<T>) -> String {
    RequestIdInterceptor::request_id(request)
        .unwrap_or("-")
        .to_string()
}

#[tonic::async_trait]
impl<R> VectorStoreServiceTrait for VectorStoreServiceImpl<R>
where
    R: VectorStoreRepository + 'static,
{
    async fn create_vector_store(
        &self,
        request: Request<CreateVectorStoreRequest>,
    ) -> Result<Response<MessageResponse>, Status> {
        let request_id = request_id(&request);
        let req = request.into_inner();
        let collection = req.collection();

        info!(request_id = %request_id, index = %collection.index_name, "CreateVectorStore");

        let message = self
            .service
            .create_vector_store(&collection)
            .await
            .map_err(|e| rpc_failure("CreateVectorStore", e))?;

        Ok(Response::new(message_response(message)))
    }

    async fn add_documents(
        &self,
        request: Request<AddDocumentsRequest>,
    ) -> Result<Response<MessageResponse>, Status> {
        let request_id = request_id(&request);
        let req = request.into_inner();
        let collection = req.collection();

        let documents: Vec<Document> = req
            .documents
            .into_iter()
            .map(|proto| {
                let mut document = Document::from(proto);
                document.assign_id();
                document
            })
            .collect();

        info!(
            request_id = %request_id,
            index = %collection.index_name,
            count = documents.len(),
            "AddDocuments"
        );

        let message = self
            .service
            .create_vector_store_and_add_documents(&collection, documents)
            .await
            .map_err(|e| rpc_failure("AddDocuments", e))?;

        Ok(Response::new(message_response(message)))
    }

    async fn search_documents(
        &self,
        request: Request<SearchDocumentsRequest>,
    ) -> Result<Response<SearchDocumentsResponse>, Status> {
        let request_id = request_id(&request);
        let req = request.into_inner();
        let collection = req.collection();

        info!(
            request_id = %request_id,
            index = %collection.index_name,
            k = req.k,
            "SearchDocuments"
        );

        let documents = self
            .service
            .search_documents(&req.query, req.k, &collection)
            .await
            .map_err(|e| rpc_failure("SearchDocuments", e))?;

        Ok(Response::new(search_response(documents)))
    }

    async fn search_documents_with_filter(
        &self,
        request: Request<SearchDocumentsWithFilterRequest>,
    ) -> Result<Response<SearchDocumentsResponse>, Status> {
        let request_id = request_id(&request);
        let req = request.into_inner();
        let collection = req.collection();
        let filter = MetadataFilter::from(&req);

        info!(
            request_id = %request_id,
            index = %collection.index_name,
            k = req.k,
            filter_key = %filter.key,
            "SearchDocumentsWithFilter"
        );

        let documents = self
            .service
            .search_documents_with_filter(&req.query, req.k, filter, &collection)
            .await
            .map_err(|e| rpc_failure("SearchDocumentsWithFilter", e))?;

        Ok(Response::new(search_response(documents)))
    }

    async fn delete_document(
        &self,
        request: Request<DeleteDocumentRequest>,
    ) -> Result<Response<MessageResponse>, Status> {
        let request_id = request_id(&request);
        let req = request.into_inner();
        let collection = req.collection();

        info!(
            request_id = %request_id,
            index = %collection.index_name,
            id = %req.id,
            "DeleteDocument"
        );

        let message = self
            .service
            .delete_document(&collection, &req.id)
            .await
            .map_err(|e| rpc_failure("DeleteDocument", e))?;

        Ok(Response::new(message_response(message)))
    }
}
