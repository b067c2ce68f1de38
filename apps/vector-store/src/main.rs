//! Vector Store gRPC Service - Entry Point

#[tokio::main]
async fn main() -> eyre::Result<()> {
    vector_store_grpc::run().await
}
