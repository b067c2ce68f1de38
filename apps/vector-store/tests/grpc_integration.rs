//! End-to-end tests: the real tonic server on an ephemeral port, backed by the
//! in-memory store and stub embeddings.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use domain_vector_store::{DOCUMENT_ID_KEY, VectorStoreService};
use grpc_server::ServerConfig;
use rpc::vectorstore::vector_store_service_client::VectorStoreServiceClient;
use rpc::vectorstore::{
    AddDocumentsRequest, CreateVectorStoreRequest, DeleteDocumentRequest, Document,
    SearchDocumentsRequest, SearchDocumentsWithFilterRequest,
};
use test_utils::{InMemoryVectorStore, StubEmbeddingProvider};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::Code;
use tonic::transport::Channel;
use tonic_health::pb::HealthCheckRequest;
use tonic_health::pb::health_check_response::ServingStatus;
use tonic_health::pb::health_client::HealthClient;

const INDEX: &str = "Articles";

struct TestServer {
    addr: SocketAddr,
    store: InMemoryVectorStore,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<eyre::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let store = InMemoryVectorStore::new();
        let service =
            VectorStoreService::new(store.clone(), Arc::new(StubEmbeddingProvider::new(256)));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let config = ServerConfig::new().with_port(addr.port());
            vector_store_grpc::serve(service, &config, listener, async {
                let _ = rx.await;
            })
            .await
        });

        Self {
            addr,
            store,
            shutdown: Some(tx),
            handle,
        }
    }

    async fn channel(&self) -> Channel {
        let endpoint = format!("http://{}", self.addr);
        for _ in 0..50 {
            if let Ok(channel) = Channel::from_shared(endpoint.clone()).unwrap().connect().await {
                return channel;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("server did not come up at {}", endpoint);
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

fn doc(content: &str, source: &str) -> Document {
    Document {
        page_content: content.to_string(),
        metadata: [("source".to_string(), source.to_string())].into(),
    }
}

#[tokio::test]
async fn test_health_reports_serving() {
    let server = TestServer::start().await;
    let mut health = HealthClient::new(server.channel().await);

    for service in ["", "vectorstore.VectorStoreService"] {
        let response = health
            .check(HealthCheckRequest {
                service: service.to_string(),
            })
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.status, ServingStatus::Serving as i32);
    }

    drop(health);
    server.stop().await;
}

#[tokio::test]
async fn test_full_document_lifecycle() {
    let server = TestServer::start().await;
    let mut client = VectorStoreServiceClient::new(server.channel().await);

    let created = client
        .create_vector_store(CreateVectorStoreRequest {
            index_name: INDEX.to_string(),
            text_key: "text".to_string(),
            metadata_keys: vec!["source".to_string()],
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(created.message, "Vector store [Articles] created successfully.");

    let added = client
        .add_documents(AddDocumentsRequest {
            index_name: INDEX.to_string(),
            text_key: "text".to_string(),
            metadata_keys: vec!["source".to_string()],
            documents: vec![
                doc("tokio tasks and channels", "book"),
                doc("tonic grpc servers", "blog"),
                doc("prost message encoding", "blog"),
            ],
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(
        added.message,
        "Vector store [Articles] created and documents added successfully."
    );
    assert_eq!(server.store.documents(INDEX).len(), 3);

    let found = client
        .search_documents(SearchDocumentsRequest {
            query: "tonic grpc servers".to_string(),
            k: 2,
            index_name: INDEX.to_string(),
            text_key: "text".to_string(),
            metadata_keys: vec!["source".to_string()],
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(found.documents.len(), 2);
    assert_eq!(found.documents[0].page_content, "tonic grpc servers");

    let filtered = client
        .search_documents_with_filter(SearchDocumentsWithFilterRequest {
            query: "tokio tasks".to_string(),
            k: 3,
            filter_key: "source".to_string(),
            filter_value: "book".to_string(),
            index_name: INDEX.to_string(),
            text_key: "text".to_string(),
            metadata_keys: vec![],
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(filtered.documents.len(), 1);
    assert_eq!(filtered.documents[0].page_content, "tokio tasks and channels");

    let id = found.documents[0].metadata[DOCUMENT_ID_KEY].clone();
    let deleted = client
        .delete_document(DeleteDocumentRequest {
            index_name: INDEX.to_string(),
            text_key: "text".to_string(),
            metadata_keys: vec![],
            id: id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(
        deleted.message,
        format!("Document with id {} deleted successfully.", id)
    );
    assert_eq!(server.store.documents(INDEX).len(), 2);

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn test_errors_carry_method_prefix_and_code() {
    let server = TestServer::start().await;
    let mut client = VectorStoreServiceClient::new(server.channel().await);

    let status = client
        .search_documents(SearchDocumentsRequest {
            query: "anything".to_string(),
            k: 0,
            index_name: INDEX.to_string(),
            text_key: "text".to_string(),
            metadata_keys: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(status.message().starts_with("Error in gRPC SearchDocuments: "));

    let status = client
        .delete_document(DeleteDocumentRequest {
            index_name: "Missing".to_string(),
            text_key: "text".to_string(),
            metadata_keys: vec![],
            id: "0b7c1f4e-8a57-4d53-9b0e-2c1c4b7b3f11".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Internal);
    assert!(status.message().starts_with("Error in gRPC DeleteDocument: "));

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn test_request_id_is_accepted() {
    let server = TestServer::start().await;
    let mut client = VectorStoreServiceClient::new(server.channel().await);

    let mut request = tonic::Request::new(CreateVectorStoreRequest {
        index_name: INDEX.to_string(),
        text_key: "text".to_string(),
        metadata_keys: vec![],
    });
    request
        .metadata_mut()
        .insert(grpc_server::REQUEST_ID_HEADER, "it-42".parse().unwrap());

    assert!(client.create_vector_store(request).await.is_ok());

    drop(client);
    server.stop().await;
}
