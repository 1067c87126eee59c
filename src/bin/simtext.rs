//! Binary entry point: load the umbrella YAML config (if present), seed the
//! server's in-memory stores with its checker defaults, and start the HTTP
//! server.

use simtext::config::SimtextConfig;
use server::ServerConfig;

#[tokio::main]
async fn main() -> server::ServerResult<()> {
    let sim_config = std::env::var("SIMTEXT_CONFIG")
        .ok()
        .and_then(|path| SimtextConfig::from_file(path).ok())
        .unwrap_or_default();

    let mut server_config = ServerConfig::load()?;
    server_config.bind_addr = sim_config.server.bind_addr;
    server_config.port = sim_config.server.port;
    server_config.check_deadline_secs = sim_config.checker.deadline_secs;

    server::start_server(server_config).await
}
