use std::time::Duration;

use serde_json::Value;

use super::{ActionResult, BearerClient};

/// Lesson and unit-test reads against the content service.
///
/// Payloads are returned as the service sends them; their shape belongs to
/// the content service.
#[derive(Debug, Clone)]
pub struct ContentClient {
    inner: BearerClient,
}

impl ContentClient {
    pub fn new(base_url: &str, timeout: Duration) -> ActionResult<Self> {
        Ok(Self {
            inner: BearerClient::new(base_url, timeout)?,
        })
    }

    /// GET /lessons/{id}
    pub async fn fetch_lesson(&self, token: &str, id: &str) -> ActionResult<Value> {
        self.inner.get_json(token, &["lessons", id], &[]).await
    }

    /// GET /lessons?action={action}&page={page}
    pub async fn fetch_lessons_by_action(&self, token: &str, action: &str, page: u32) -> ActionResult<Value> {
        self.inner
            .get_json(
                token,
                &["lessons"],
                &[("action", action.to_string()), ("page", page.to_string())],
            )
            .await
    }

    /// GET /unit-tests/{id}
    pub async fn fetch_unit_test(&self, token: &str, id: &str) -> ActionResult<Value> {
        self.inner.get_json(token, &["unit-tests", id], &[]).await
    }
}
