//! ReportMate · evaluation comment backend
//!
//! - Axum HTTP + WebSocket API
//! - Deterministic comment generation from teacher-authored templates
//!
//! Important env variables:
//!   PORT                   : u16 (default 3000)
//!   REPORTMATE_CONFIG_PATH : path to TOML config (review settings + classroom bank)
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use reportmate_backend::routes::build_router;
use reportmate_backend::state::AppState;
use reportmate_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "reportmate_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "reportmate_backend", error = %e, "Failed to listen for shutdown signal");
  }
  info!(target: "reportmate_backend", "Shutting down");
}
