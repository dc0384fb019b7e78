//! Larder API server: loads settings, connects storage and serves the REST
//! API with health probes and, in debug builds, Swagger UI.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use larder::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, connect_storage, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;
    let storage = connect_storage(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, &storage)?;
    info!(bind_addr = ?settings.bind_addr, "larder listening");
    server.await
}
