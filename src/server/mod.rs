//! # HTTP Server for Receipt Printing
//!
//! Lets the salon front end print receipts on a printer attached to the
//! machine running the server.
//!
//! ## Usage
//!
//! ```bash
//! kvittering serve --listen 0.0.0.0:8080 --device /dev/ttyUSB0
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | GET | `/api/printer/status` | | `{"supported", "device", "paper"}` |
//! | POST | `/api/receipt/print` | receipt JSON | `{"success", ...}` |
//! | POST | `/api/receipt/preview` | receipt JSON | plain text |
//! | POST | `/api/receipt/encode` | receipt JSON | printer bytes |
//! | POST | `/api/drawer/open` | | `{"success", ...}` |
//!
//! Print failures map to `501` when the host cannot print over serial at
//! all and `502` when the printer could not be reached.

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{KvitteringError, Result};
use crate::transport::PrintTransport;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/printer/status", get(handlers::printer::status))
        .route("/api/drawer/open", post(handlers::printer::open_drawer))
        .route("/api/receipt/print", post(handlers::receipt::print))
        .route("/api/receipt/preview", post(handlers::receipt::preview))
        .route("/api/receipt/encode", post(handlers::receipt::encode_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use kvittering::server::{serve, ServerConfig};
/// use kvittering::transport::PrintTransport;
///
/// # async fn example() -> kvittering::error::Result<()> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     printer: Default::default(),
///     business: Default::default(),
/// };
///
/// serve(config, PrintTransport::tty(None)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, transport: PrintTransport) -> Result<()> {
    let listen_addr = config.listen_addr.clone();

    info!(
        listen = %listen_addr,
        device = transport.device().as_deref().unwrap_or("auto"),
        paper = config.printer.name,
        serial_supported = transport.is_supported(),
        "kvittering HTTP server starting"
    );

    let app = router(Arc::new(AppState::new(config, transport)));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| {
            KvitteringError::Config(format!("Failed to bind to {listen_addr}: {e}"))
        })?;

    axum::serve(listener, app).await?;

    Ok(())
}
