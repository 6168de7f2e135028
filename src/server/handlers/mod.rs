//! HTTP handlers for the server.

pub mod printer;
pub mod receipt;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::KvitteringError;

use super::state::AppState;

/// Print `data` while holding the print lock and map the outcome to a response.
async fn send_to_printer(state: &AppState, data: &[u8]) -> Response {
    let _guard = state.print_lock.lock().await;

    match state.transport.print(data).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "bytes": data.len() })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

fn status_for(err: &KvitteringError) -> StatusCode {
    match err {
        KvitteringError::UnsupportedTransport => StatusCode::NOT_IMPLEMENTED,
        KvitteringError::Transport { .. } => StatusCode::BAD_GATEWAY,
        KvitteringError::Receipt(_) | KvitteringError::Config(_) | KvitteringError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Generate error response JSON.
fn error_response(err: &KvitteringError) -> Response {
    (
        status_for(err),
        Json(json!({ "success": false, "error": err.to_string() })),
    )
        .into_response()
}

/// Report a body that is not a valid receipt in the same JSON shape as
/// printer errors, keeping axum's status (400, 415 or 422).
fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection.body_text(), "rejected receipt body");
    (
        rejection.status(),
        Json(json!({ "success": false, "error": rejection.body_text() })),
    )
        .into_response()
}
