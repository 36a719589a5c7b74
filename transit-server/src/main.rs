use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::config::ServerConfig;
use transit_server::network::Network;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Load the network up front (fail fast on bad data)
    let network = Network::from_path(&config.network_path)?;
    info!(
        vertices = network.graph().vertex_count(),
        edges = network.graph().edge_count(),
        "transit graph ready"
    );

    let state = AppState::new(network, &config.cache);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "transit server listening");
    info!("endpoints: GET /health, /stops/:name, /lines, /lines/:name, /lines/:name/geometry, /route; POST /stat");

    axum::serve(listener, app).await?;
    Ok(())
}
