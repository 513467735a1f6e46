use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Principal;
use crate::state::AppState;

/// Why a request carries no usable session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingSession {
    NoHeader,
    Malformed(&'static str),
    Rejected(String),
}

impl std::fmt::Display for MissingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingSession::NoHeader => write!(f, "Missing Authorization header"),
            MissingSession::Malformed(why) => write!(f, "{}", why),
            MissingSession::Rejected(why) => write!(f, "Invalid session token: {}", why),
        }
    }
}

/// Session lookup: the principal named by the bearer credential, if any
pub fn session_principal(state: &AppState, headers: &HeaderMap) -> Result<Principal, MissingSession> {
    let token = extract_bearer_token(headers)?;

    state
        .sessions
        .verify(&token)
        .map_err(|e| MissingSession::Rejected(e.to_string()))
}

/// Optional session context for page routes.
///
/// Inserts `Option<Principal>` into request extensions so page handlers can
/// read who is signed in without repeating the lookup. Never rejects.
pub async fn session_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = match session_principal(&state, request.headers()) {
        Ok(principal) => Some(principal),
        Err(MissingSession::NoHeader) => None,
        Err(reason) => {
            tracing::debug!(%reason, "Ignoring unusable session on page request");
            None
        }
    };

    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, MissingSession> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(MissingSession::NoHeader)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| MissingSession::Malformed("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(MissingSession::Malformed("Empty bearer token")),
        None => Err(MissingSession::Malformed(
            "Authorization header must use Bearer token format",
        )),
    }
}
