// handlers/elevated/payments/revenue_chart.rs - GET /api/admin/payments/revenue-chart

use axum::{extract::State, http::HeaderMap};

use crate::billing::RevenueChart;
use crate::middleware::{admin_guard, ApiResponse, ApiResult, GuardOutcome};
use crate::state::AppState;

pub async fn revenue_chart_get(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<RevenueChart> {
    let principal = match admin_guard(&state, &headers) {
        GuardOutcome::Authorized(principal) => principal,
        GuardOutcome::Denied(denied) => return Err(denied),
    };

    let chart = state.billing.fetch_revenue_chart().await?;

    tracing::debug!(principal = %principal.id, series = chart.series.len(), "Served revenue chart");
    Ok(ApiResponse::success(chart))
}
