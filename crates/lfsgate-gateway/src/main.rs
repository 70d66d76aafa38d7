//! lfsgate gateway binary.
//!
//! Loads the YAML config (`LFSGATE_CONFIG` or `lfsgate.yaml`), builds the
//! GitHub-backed pipeline and serves the LFS API over HTTP.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use lfsgate_core::error::{LfsGateError, Result};
use lfsgate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_env()?;
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| LfsGateError::Config(format!("gateway.listen must be a valid SocketAddr: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "lfsgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| LfsGateError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| LfsGateError::Internal(format!("server failed: {e}")))
}
