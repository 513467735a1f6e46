// handlers/pages/mod.rs - Locale-prefixed learner pages
//
// Every route here lives under /:locale. The session context middleware
// has already put an `Option<Principal>` into request extensions; data
// actions forward that principal's own bearer credential.

pub mod layout;         // GET /:locale/layout
pub mod lessons;        // GET /:locale/lessons, /:locale/lessons/:id, /:locale/unit-tests/:id
pub mod subscription;   // GET /:locale/subscription, /:locale/premium/lessons/:id

pub use layout::layout_get;
pub use lessons::{lesson_get, lessons_get, unit_test_get};
pub use subscription::{premium_lesson_get, subscription_get};

use crate::auth::Principal;
use crate::error::ApiError;

/// Data actions need a signed-in learner to borrow a credential from
pub(crate) fn require_session(principal: Option<Principal>) -> Result<Principal, ApiError> {
    principal.ok_or_else(|| ApiError::unauthorized("Sign in required"))
}
