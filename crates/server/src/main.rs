//! Standalone entry point for the similarity-check HTTP server.

use server::ServerConfig;

#[tokio::main]
async fn main() -> server::ServerResult<()> {
    let config = ServerConfig::load()?;
    server::start_server(config).await
}
