use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::auth::{SessionError, SessionVerifier};
use crate::billing::{BillingError, BillingProvider, StripeBilling};
use crate::client::{ActionError, ContentClient};
use crate::config::AppConfig;
use crate::locale::LocaleResolver;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("session verifier: {0}")]
    Session(#[from] SessionError),

    #[error("billing provider: {0}")]
    Billing(#[from] BillingError),

    #[error("content client: {0}")]
    Content(#[from] ActionError),
}

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<SessionVerifier>,
    pub billing: Arc<dyn BillingProvider>,
    pub content: ContentClient,
    pub locales: Arc<LocaleResolver>,
}

impl AppState {
    /// Production wiring: Stripe as the billing provider
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let billing = StripeBilling::new(&config.billing)?;
        Self::with_billing(config, Arc::new(billing))
    }

    pub fn with_billing(config: AppConfig, billing: Arc<dyn BillingProvider>) -> Result<Self, StartupError> {
        let sessions = SessionVerifier::from_config(&config.security)?;
        let content = ContentClient::new(
            &config.urls.content_api_url,
            Duration::from_secs(config.http.request_timeout_secs),
        )?;
        let locales = LocaleResolver::new(&config.locale);

        Ok(Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            billing,
            content,
            locales: Arc::new(locales),
        })
    }
}
