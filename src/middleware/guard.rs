//! Admin authorization guard.
//!
//! Every admin handler calls [`admin_guard`] before touching a collaborator
//! and returns the `Denied` response untouched when it is not `Authorized`.

use axum::http::HeaderMap;

use crate::auth::Principal;
use crate::error::ApiError;
use crate::state::AppState;

use super::auth::session_principal;

#[derive(Debug)]
pub enum GuardOutcome {
    Authorized(Principal),
    /// Terminal response: 401 without a usable session, 403 without the admin role
    Denied(ApiError),
}

pub fn admin_guard(state: &AppState, headers: &HeaderMap) -> GuardOutcome {
    let principal = match session_principal(state, headers) {
        Ok(principal) => principal,
        Err(reason) => {
            tracing::warn!(%reason, "Admin request without a valid session");
            return GuardOutcome::Denied(ApiError::unauthorized("Unauthorized"));
        }
    };

    if !principal.is_admin() {
        tracing::warn!(principal = %principal.id, role = ?principal.role, "Admin request with insufficient role");
        return GuardOutcome::Denied(ApiError::forbidden("Forbidden"));
    }

    GuardOutcome::Authorized(principal)
}
