use std::time::Duration;

use serde::de::DeserializeOwned;

use super::{ActionError, ActionResult, BearerClient};
use crate::billing::{Invoice, RevenueChart, Transaction};
use crate::middleware::response::Envelope;

/// Typed client for the admin payments API
#[derive(Debug, Clone)]
pub struct AdminClient {
    inner: BearerClient,
}

impl AdminClient {
    pub fn new(base_url: &str, timeout: Duration) -> ActionResult<Self> {
        Ok(Self {
            inner: BearerClient::new(base_url, timeout)?,
        })
    }

    pub async fn fetch_invoice(&self, token: &str, id: &str) -> ActionResult<Invoice> {
        self.get(token, &["api", "admin", "payments", "invoice", id], &[]).await
    }

    pub async fn fetch_revenue_chart(&self, token: &str) -> ActionResult<RevenueChart> {
        self.get(token, &["api", "admin", "payments", "revenue-chart"], &[]).await
    }

    /// `None` lets the server apply its default limit
    pub async fn fetch_transactions(&self, token: &str, limit: Option<u64>) -> ActionResult<Vec<Transaction>> {
        let query: Vec<(&str, String)> = limit.map(|l| ("limit", l.to_string())).into_iter().collect();
        self.get(token, &["api", "admin", "payments", "transaction"], &query).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ActionResult<T> {
        let envelope: Envelope<T> = match self.inner.get_json(token, segments, query).await {
            Ok(envelope) => envelope,
            // Error bodies are envelopes too; surface their message
            Err(ActionError::Status { status, message }) => {
                let message = serde_json::from_str::<Envelope<serde_json::Value>>(&message)
                    .ok()
                    .and_then(|e| e.error().map(str::to_string))
                    .unwrap_or(message);
                return Err(ActionError::Status { status, message });
            }
            Err(other) => return Err(other),
        };

        envelope.into_result().map_err(ActionError::Decode)
    }
}
