//! gRPC Server utilities.

use super::config::ServerConfig;
use tracing::info;

/// Helper for creating gRPC servers with health checks.
pub struct GrpcServer;

impl GrpcServer {
    /// Log server startup information for a single service.
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        Self::log_startup_multiple(config, &[service_name]);
    }

    /// Log server startup information for multiple services.
    pub fn log_startup_multiple(config: &ServerConfig, service_names: &[&str]) {
        info!(
            addr = %config.addr_string(),
            services = ?service_names,
            compression = config.enable_compression,
            max_message_size = config.max_decoding_message_size,
            "gRPC server starting"
        );
    }

    /// Set up health reporting for a single service.
    ///
    /// Marks both the specific service and the empty service name as serving
    /// (empty is what k8s default gRPC probes query).
    pub async fn setup_health(
        health_reporter: &tonic_health::server::HealthReporter,
        service_name: &str,
    ) {
        Self::setup_health_multiple(health_reporter, &[service_name]).await;
    }

    /// Set up health reporting for multiple services.
    pub async fn setup_health_multiple(
        health_reporter: &tonic_health::server::HealthReporter,
        service_names: &[&str],
    ) {
        for service_name in service_names {
            health_reporter
                .set_service_status(*service_name, tonic_health::ServingStatus::Serving)
                .await;
        }

        health_reporter
            .set_service_status("", tonic_health::ServingStatus::Serving)
            .await;

        info!(services = ?service_names, "Health check service enabled (grpc.health.v1.Health)");
    }

    /// Mark every listed service as not serving, e.g. once shutdown begins.
    pub async fn mark_not_serving(
        health_reporter: &tonic_health::server::HealthReporter,
        service_names: &[&str],
    ) {
        for service_name in service_names.iter().copied().chain(std::iter::once("")) {
            health_reporter
                .set_service_status(service_name, tonic_health::ServingStatus::NotServing)
                .await;
        }
    }
}

pub use tonic_health::server::health_reporter as create_health_service;
