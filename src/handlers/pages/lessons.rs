use axum::extract::{Extension, Path, Query, State};
use serde::Deserialize;
use serde_json::Value;

use super::require_session;
use crate::auth::Principal;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LessonsQuery {
    pub action: Option<String>,
    pub page: Option<String>,
}

/// Pages are 1-based; anything unparsable reads as the first page
pub fn page_number(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

/// GET /:locale/lessons/:id
pub async fn lesson_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Option<Principal>>,
    Path((_locale, id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let principal = require_session(principal)?;
    let lesson = state.content.fetch_lesson(&principal.token, &id).await?;
    Ok(ApiResponse::success(lesson))
}

/// GET /:locale/lessons?action=..&page=..
pub async fn lessons_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Option<Principal>>,
    Path(_locale): Path<String>,
    Query(query): Query<LessonsQuery>,
) -> ApiResult<Value> {
    let principal = require_session(principal)?;

    let action = query
        .action
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'action' is required"))?;
    let page = page_number(query.page.as_deref());

    let lessons = state
        .content
        .fetch_lessons_by_action(&principal.token, action, page)
        .await?;
    Ok(ApiResponse::success(lessons))
}

/// GET /:locale/unit-tests/:id
pub async fn unit_test_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Option<Principal>>,
    Path((_locale, id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let principal = require_session(principal)?;
    let unit_test = state.content.fetch_unit_test(&principal.token, &id).await?;
    Ok(ApiResponse::success(unit_test))
}
