// handlers/elevated/payments/transaction.rs - GET /api/admin/payments/transaction?limit=N

use axum::{
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;

use crate::billing::{Transaction, MAX_LIST_LIMIT};
use crate::middleware::{admin_guard, ApiResponse, ApiResult, GuardOutcome};
use crate::state::AppState;

pub const DEFAULT_LIMIT: u64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    // Kept as text so a bad value falls back to the default instead of a 400
    pub limit: Option<String>,
}

/// Limit forwarded to the billing provider.
///
/// Absent, non-numeric or zero → 50; anything above the provider maximum is
/// clamped to it.
pub fn effective_limit(raw: Option<&str>) -> u64 {
    match raw.and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(0) | None => DEFAULT_LIMIT,
        Some(n) => n.min(MAX_LIST_LIMIT),
    }
}

pub async fn transaction_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Vec<Transaction>> {
    let principal = match admin_guard(&state, &headers) {
        GuardOutcome::Authorized(principal) => principal,
        GuardOutcome::Denied(denied) => return Err(denied),
    };

    let limit = effective_limit(query.limit.as_deref());
    let transactions = state.billing.fetch_transactions(limit).await?;

    tracing::debug!(principal = %principal.id, limit, count = transactions.len(), "Served transactions");
    Ok(ApiResponse::success(transactions))
}
