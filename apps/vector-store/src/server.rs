//! gRPC server initialization and lifecycle management
//!
//! - Tracing initialization
//! - Qdrant client and OpenAI provider setup
//! - Health check service (grpc.health.v1.Health)
//! - gRPC server configuration, startup and graceful shutdown

use std::future::Future;
use std::sync::Arc;

use core_config::{Environment, FromEnv};
use domain_vector_store::{
    OpenAIConfig, OpenAIProvider, QdrantConfig, QdrantRepository, VectorStoreRepository,
    VectorStoreService,
};
use eyre::{Result, WrapErr};
use grpc_server::{GrpcServer, RequestIdInterceptor, ServerConfig, shutdown_signal};
use rpc::vectorstore::vector_store_service_server::{SERVICE_NAME, VectorStoreServiceServer};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Server;
use tracing::info;

use crate::service::VectorStoreServiceImpl;

/// Run the gRPC server
///
/// 1. Sets up structured logging (JSON for prod, pretty for dev)
/// 2. Loads server, Qdrant and OpenAI configuration from the environment
/// 3. Builds the repository, embedding provider and service layers
/// 4. Serves until SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if configuration is missing or invalid, the Qdrant client
/// cannot be built, the address cannot be bound, or the server fails.
pub async fn run() -> Result<()> {
    core_config::tracing::install_color_eyre();
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let server_config =
        ServerConfig::from_env().wrap_err("Failed to load gRPC server configuration")?;
    let qdrant_config = QdrantConfig::from_env().wrap_err("Failed to load Qdrant configuration")?;
    let openai_config = OpenAIConfig::from_env().wrap_err("Failed to load OpenAI configuration")?;

    info!(url = %qdrant_config.url(), "Connecting to Qdrant");
    let repository =
        QdrantRepository::new(qdrant_config).wrap_err("Failed to create Qdrant client")?;

    info!(
        model = %openai_config.model,
        dimension = openai_config.dimension(),
        "OpenAI embedding provider configured"
    );
    let provider = Arc::new(OpenAIProvider::new(openai_config));

    let service = VectorStoreService::new(repository, provider);

    let addr = server_config
        .socket_addr()
        .wrap_err_with(|| format!("Failed to parse server address: {}", server_config.addr_string()))?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    serve(service, &server_config, listener, shutdown_signal()).await
}

/// Serve `service` on an already-bound listener until `shutdown` resolves.
///
/// Health reports SERVING for the vector store service and the empty service
/// name while running, and NOT_SERVING once shutdown begins.
pub async fn serve<R, F>(
    service: VectorStoreService<R>,
    config: &ServerConfig,
    listener: TcpListener,
    shutdown: F,
) -> Result<()>
where
    R: VectorStoreRepository + 'static,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = grpc_server::create_health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let mut server = VectorStoreServiceServer::new(VectorStoreServiceImpl::new(service))
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);
    if let Some(encoding) = config.compression() {
        server = server.accept_compressed(encoding).send_compressed(encoding);
    }

    if let Ok(local_addr) = listener.local_addr() {
        info!(addr = %local_addr, "VectorStoreService listening");
    }
    GrpcServer::log_startup(config, SERVICE_NAME);

    let reporter = health_reporter.clone();
    Server::builder()
        .add_service(health_service)
        .add_service(InterceptedService::new(server, RequestIdInterceptor::new()))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            shutdown.await;
            GrpcServer::mark_not_serving(&reporter, &[SERVICE_NAME]).await;
        })
        .await
        .wrap_err("gRPC server failed")?;

    info!("VectorStoreService stopped");
    Ok(())
}
