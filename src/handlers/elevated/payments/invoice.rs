// handlers/elevated/payments/invoice.rs - GET /api/admin/payments/invoice/:id

use axum::{
    extract::{Path, State},
    http::HeaderMap,
};

use crate::billing::Invoice;
use crate::middleware::{admin_guard, ApiResponse, ApiResult, GuardOutcome};
use crate::state::AppState;

pub async fn invoice_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Invoice> {
    let principal = match admin_guard(&state, &headers) {
        GuardOutcome::Authorized(principal) => principal,
        GuardOutcome::Denied(denied) => return Err(denied),
    };

    let invoice = state.billing.fetch_invoice(&id).await?;

    tracing::debug!(principal = %principal.id, invoice = %invoice.id, "Served invoice");
    Ok(ApiResponse::success(invoice))
}
