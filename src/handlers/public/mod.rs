// handlers/public/mod.rs - Public handlers (no session required)

use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET / - service index
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "Lingo API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "admin": "/api/admin/payments/{invoice/:id,revenue-chart,transaction} (admin session)",
            "pages": "/:locale/{layout,lessons,lessons/:id,unit-tests/:id,subscription,premium/lessons/:id}",
        }
    }))
}

/// GET /health - liveness; collaborators are not probed
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "environment": state.config.environment,
        "default_locale": state.locales.default_locale(),
    }))
}

/// Unmatched paths: unlocalized page paths get the default locale, the rest 404
pub async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    match state.locales.redirect_target(uri.path(), uri.query()) {
        Some(target) => Redirect::temporary(&target).into_response(),
        None => ApiError::not_found(format!("No route for {}", uri.path())).into_response(),
    }
}
