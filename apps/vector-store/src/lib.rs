//! Vector Store gRPC Service
//!
//! gRPC façade over an external vector database and embedding API. Serves
//! `vectorstore.VectorStoreService` on port 50051 by default.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional Zstd compression)
//! VectorStoreServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions)
//! VectorStoreService (domain layer)
//!   ↓
//! ┌──────────────────┬───────────────────┐
//! │ QdrantRepository │  OpenAIProvider   │
//! └──────────────────┴───────────────────┘
//!   ↓                    ↓
//! Qdrant             OpenAI API
//! ```
//!
//! ## Modules
//!
//! - `server`: Server initialization and lifecycle
//! - `service`: gRPC service implementation (VectorStoreServiceImpl)

pub mod server;
pub mod service;

pub use server::{run, serve};
pub use service::VectorStoreServiceImpl;
