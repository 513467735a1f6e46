pub mod auth;
pub mod guard;
pub mod locale;
pub mod response;

pub use auth::{extract_bearer_token, session_context_middleware, session_principal, MissingSession};
pub use guard::{admin_guard, GuardOutcome};
pub use locale::locale_redirect_middleware;
pub use response::{ApiResponse, ApiResult, Envelope};
