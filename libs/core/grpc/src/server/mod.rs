//! gRPC Server helpers
//!
//! Configuration plus health and startup-logging helpers shared by the
//! server binaries.

mod builder;
mod config;

pub use builder::{GrpcServer, create_health_service};
pub use config::ServerConfig;
