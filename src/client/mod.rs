//! Bearer-authenticated data actions.
//!
//! Each action takes the caller's credential, attaches it as
//! `Authorization: Bearer`, issues one GET and hands back the payload or a
//! typed [`ActionError`].

pub mod admin;
pub mod content;

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

pub use admin::AdminClient;
pub use content::ContentClient;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("no credential available for this action")]
    MissingCredential,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("could not decode response: {0}")]
    Decode(String),
}

pub type ActionResult<T> = Result<T, ActionError>;

// Keep upstream error bodies from flooding logs
const MAX_ERROR_BODY: usize = 512;

/// Shared GET plumbing for the action clients
#[derive(Debug, Clone)]
pub(crate) struct BearerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BearerClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> ActionResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ActionError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ActionError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    /// Join path segments onto the base URL, percent-encoding each one
    pub(crate) fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ActionResult<T> {
        if token.trim().is_empty() {
            return Err(ActionError::MissingCredential);
        }

        let url = self.url(segments, query);
        tracing::debug!(%url, "Issuing bearer GET");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let status = response.status();

        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY).rev().find(|i| message.is_char_boundary(*i)).unwrap_or(0);
                message.truncate(cut);
            }
            return Err(ActionError::Status { status, message });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ActionError::Decode(e.to_string()))
    }
}
