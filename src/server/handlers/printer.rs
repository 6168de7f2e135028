//! Printer status and cash drawer handlers.

use axum::{Json, extract::State, response::Response};
use serde::Serialize;
use std::sync::Arc;

use crate::receipt::drawer_kick;

use super::super::state::AppState;
use super::send_to_printer;

#[derive(Debug, Serialize)]
pub struct PrinterStatus {
    /// Whether printing can be attempted at all; the UI hides the print button otherwise
    pub supported: bool,
    pub device: Option<String>,
    pub paper: &'static str,
}

/// GET /api/printer/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<PrinterStatus> {
    Json(PrinterStatus {
        supported: state.transport.is_supported(),
        device: state.transport.device(),
        paper: state.config.printer.name,
    })
}

/// POST /api/drawer/open
pub async fn open_drawer(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!("cash drawer kick requested");
    send_to_printer(&state, &drawer_kick()).await
}
