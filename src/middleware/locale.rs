use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Locale check for page routes.
///
/// Unlocalized page paths are redirected to the default locale. Paths whose
/// first segment is an unsupported locale (`/fr/layout`) or a reserved
/// prefix (`api`) are not pages and 404 here.
pub async fn locale_redirect_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let uri = request.uri();
    if let Some(target) = state.locales.redirect_target(uri.path(), uri.query()) {
        tracing::debug!(from = %uri, to = %target, "Redirecting to localized path");
        return Redirect::temporary(&target).into_response();
    }

    let locale = uri.path().trim_start_matches('/').split('/').next().unwrap_or_default();
    if !state.locales.is_supported(locale) {
        return ApiError::not_found(format!("No route for {}", uri.path())).into_response();
    }

    next.run(request).await
}
