//! # gRPC Server Library
//!
//! Shared plumbing for the tonic servers in this workspace: environment-driven
//! server configuration, `grpc.health.v1.Health` reporting, request-id
//! propagation, and graceful shutdown on SIGINT/SIGTERM.
//!
//! ## Quick Start
//!
//! ```ignore
//! use core_config::FromEnv;
//! use grpc_server::{GrpcServer, RequestIdInterceptor, ServerConfig, shutdown_signal};
//! use rpc::vectorstore::vector_store_service_server::{SERVICE_NAME, VectorStoreServiceServer};
//! use tonic::service::interceptor::InterceptedService;
//! use tonic::transport::Server;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = grpc_server::create_health_service();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! let service = VectorStoreServiceServer::new(my_impl);
//! Server::builder()
//!     .add_service(health_service)
//!     .add_service(InterceptedService::new(service, RequestIdInterceptor::new()))
//!     .serve_with_shutdown(config.socket_addr()?, shutdown_signal())
//!     .await?;
//! ```

pub mod interceptors;
pub mod server;
pub mod shutdown;

pub use interceptors::{REQUEST_ID_HEADER, RequestIdInterceptor};
pub use server::{GrpcServer, ServerConfig, create_health_service};
pub use shutdown::shutdown_signal;
