//! Receipt printing handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    protocol::decode,
    receipt::{Receipt, format_receipt_for},
};

use super::super::state::AppState;
use super::{rejection_response, send_to_printer};

/// Lay out a submitted receipt with the server's paper profile and defaults.
fn encode(state: &AppState, receipt: Receipt) -> Vec<u8> {
    let receipt = Receipt {
        business: receipt.business.with_defaults(&state.config.business),
        ..receipt
    };
    format_receipt_for(&receipt, &state.config.printer)
}

/// Handle POST /api/receipt/print - print the receipt.
pub async fn print(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Response {
    let receipt = match payload {
        Ok(Json(receipt)) => receipt,
        Err(rejection) => return rejection_response(rejection),
    };
    let order = receipt.order_number.clone();
    let data = encode(&state, receipt);
    tracing::info!(order = %order, bytes = data.len(), "receipt print requested");
    send_to_printer(&state, &data).await
}

/// Handle POST /api/receipt/preview - plain text of the receipt.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(receipt)) => {
            let text = decode::plain_text(&encode(&state, receipt));
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
        }
        Err(rejection) => rejection_response(rejection),
    }
}

/// Handle POST /api/receipt/encode - raw printer bytes.
pub async fn encode_bytes(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(receipt)) => {
            let data = encode(&state, receipt);
            ([(header::CONTENT_TYPE, "application/octet-stream")], data).into_response()
        }
        Err(rejection) => rejection_response(rejection),
    }
}
