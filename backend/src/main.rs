//! Backend entry-point: wires the record endpoints, health probes, and docs.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::demo_data::DemoDataSettings;
use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, create_server};

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

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let demo_data = DemoDataSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load demo data settings: {e}")))?;

    let config = ServerConfig::new(bind_addr).with_demo_data(demo_data);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
