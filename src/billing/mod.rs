//! Billing collaborator.
//!
//! Admin handlers only see [`BillingProvider`]; the Stripe-backed
//! implementation lives in [`stripe_client`].

pub mod chart;
pub mod stripe_client;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use chart::{RevenueChart, RevenuePoint, RevenueSeries};
pub use stripe_client::StripeBilling;

/// Stripe rejects list limits outside this range
pub const MAX_LIST_LIMIT: u64 = 100;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Billing provider error: {0}")]
    Provider(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<stripe::StripeError> for BillingError {
    fn from(err: stripe::StripeError) -> Self {
        BillingError::Provider(err.to_string())
    }
}

pub type BillingResult<T> = Result<T, BillingError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: Option<String>,
    pub status: String,
    /// Absent on some draft invoices
    pub currency: Option<String>,
    /// Minor currency units
    pub amount_due: i64,
    pub amount_paid: i64,
    pub customer_email: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub hosted_invoice_url: Option<String>,
    pub invoice_pdf: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Minor currency units
    pub amount: i64,
    pub amount_refunded: i64,
    pub currency: String,
    pub status: String,
    pub paid: bool,
    pub description: Option<String>,
    pub customer_email: Option<String>,
    pub created: DateTime<Utc>,
}

#[async_trait]
pub trait BillingProvider: Send + Sync {
    async fn fetch_invoice(&self, id: &str) -> BillingResult<Invoice>;

    async fn fetch_revenue_chart(&self) -> BillingResult<RevenueChart>;

    /// Most recent transactions first; `limit` is already clamped by the caller
    async fn fetch_transactions(&self, limit: u64) -> BillingResult<Vec<Transaction>>;
}
