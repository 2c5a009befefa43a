//! Backend entry-point: loads settings, prepares the record store and serves
//! the journey API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_http_state, create_server, load_initial_state};
use weight_journey::config::AppSettings;
use weight_journey::inbound::http::health::HealthState;
use weight_journey::startup::build_application;

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

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let application = build_application(&settings)
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, build_http_state(&application));
    info!(address = %config.bind_addr(), "starting HTTP server");
    let server = create_server(health_state.clone(), config)?;

    load_initial_state(&application.journey, &health_state).await;
    server.await
}
