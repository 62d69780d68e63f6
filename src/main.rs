//! Auto-RPPM · Lesson Plan Generator Backend
//!
//! - Axum HTTP API + server-rendered document views
//! - Gemini integration (via environment variables)
//! - Static form page fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   GEMINI_API_KEY     : enables plan generation if present
//!   GEMINI_BASE_URL    : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL       : default "gemini-2.5-flash"
//!   PROMPT_CONFIG_PATH : path to TOML config (prompt overrides)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use rppm_backend::routes::build_router;
use rppm_backend::state::AppState;
use rppm_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    // Build shared application state (session store, Gemini client, prompts).
    let state = Arc::new(AppState::new());

    // Build the HTTP router with routes, CORS and tracing layers.
    let app = build_router(state.clone());

    // Read port from env or default to 3000.
    let addr: SocketAddr = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

    let listener = TcpListener::bind(addr).await?;
    info!(target: "rppm_backend", %addr, "HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
