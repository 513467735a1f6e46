use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use super::require_session;
use crate::auth::{Principal, SubscriptionTier};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::subscription::{premium_gate, PageAccess};

#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    pub tier: SubscriptionTier,
}

/// GET /:locale/subscription
pub async fn subscription_get(
    Extension(principal): Extension<Option<Principal>>,
) -> ApiResult<SubscriptionView> {
    let principal = require_session(principal)?;
    Ok(ApiResponse::success(SubscriptionView {
        tier: principal.subscription,
    }))
}

/// GET /:locale/premium/lessons/:id
pub async fn premium_lesson_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Option<Principal>>,
    Path((locale, id)): Path<(String, String)>,
) -> Response {
    let principal = match premium_gate(principal, &locale, &state.config.urls.app_url) {
        PageAccess::Granted(principal) => principal,
        PageAccess::Redirect(target) => {
            tracing::debug!(%target, "Premium page redirected");
            return Redirect::to(&target).into_response();
        }
    };

    match state.content.fetch_lesson(&principal.token, &id).await {
        Ok(lesson) => ApiResponse::success(lesson).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
