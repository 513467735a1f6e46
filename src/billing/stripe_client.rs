//! Stripe-backed billing provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stripe::{Charge, ChargeId, ChargeStatus, Client, InvoiceId, InvoiceStatus, List, ListCharges, RangeQuery};

use super::chart::{build_chart, window_start, RevenueChart, RevenueSample};
use super::{BillingError, BillingProvider, BillingResult, Invoice, Transaction, MAX_LIST_LIMIT};
use crate::config::BillingConfig;

// Upper bound on list pages walked for one revenue chart
const MAX_CHART_PAGES: usize = 50;

/// Stripe billing client
#[derive(Clone)]
pub struct StripeBilling {
    client: Client,
    chart_months: u32,
}

impl StripeBilling {
    pub fn new(config: &BillingConfig) -> BillingResult<Self> {
        if config.stripe_secret_key.is_empty() {
            return Err(BillingError::Config("STRIPE_SECRET_KEY not set".to_string()));
        }

        Ok(Self {
            client: Client::new(config.stripe_secret_key.clone()),
            chart_months: config.revenue_chart_months.max(1),
        })
    }

    async fn list_charges(
        &self,
        limit: u64,
        created_since: Option<i64>,
        starting_after: Option<ChargeId>,
    ) -> BillingResult<List<Charge>> {
        let mut params = ListCharges::new();
        params.limit = Some(limit);
        params.created = created_since.map(RangeQuery::gte);
        params.starting_after = starting_after;

        Ok(Charge::list(&self.client, &params).await?)
    }
}

#[async_trait]
impl BillingProvider for StripeBilling {
    async fn fetch_invoice(&self, id: &str) -> BillingResult<Invoice> {
        let invoice_id: InvoiceId = id
            .parse()
            .map_err(|_| BillingError::InvalidInput(format!("'{}' is not a Stripe invoice id", id)))?;

        let invoice = stripe::Invoice::retrieve(&self.client, &invoice_id, &[]).await?;
        Ok(invoice_from_stripe(invoice))
    }

    async fn fetch_revenue_chart(&self) -> BillingResult<RevenueChart> {
        let now = Utc::now();
        let since = window_start(now, self.chart_months).timestamp();

        let mut samples = Vec::new();
        let mut cursor: Option<ChargeId> = None;
        let mut exhausted = false;

        for _ in 0..MAX_CHART_PAGES {
            let page = self.list_charges(MAX_LIST_LIMIT, Some(since), cursor.take()).await?;
            cursor = page.data.last().map(|c| c.id.clone());

            samples.extend(page.data.iter().filter_map(revenue_sample));

            if !page.has_more || cursor.is_none() {
                exhausted = true;
                break;
            }
        }

        if !exhausted {
            tracing::warn!(pages = MAX_CHART_PAGES, "Revenue chart truncated at page limit");
        }

        Ok(build_chart(&samples, now, self.chart_months))
    }

    async fn fetch_transactions(&self, limit: u64) -> BillingResult<Vec<Transaction>> {
        let page = self.list_charges(limit, None, None).await?;
        Ok(page.data.into_iter().filter_map(transaction_from_charge).collect())
    }
}

fn timestamp(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn invoice_from_stripe(inv: stripe::Invoice) -> Invoice {
    let status = match inv.status {
        Some(InvoiceStatus::Draft) => "draft",
        Some(InvoiceStatus::Open) => "open",
        Some(InvoiceStatus::Paid) => "paid",
        Some(InvoiceStatus::Void) => "void",
        Some(InvoiceStatus::Uncollectible) => "uncollectible",
        None => "unknown",
    };

    Invoice {
        id: inv.id.to_string(),
        number: inv.number,
        status: status.to_string(),
        currency: inv.currency.map(|c| c.to_string()),
        amount_due: inv.amount_due.unwrap_or(0),
        amount_paid: inv.amount_paid.unwrap_or(0),
        customer_email: inv.customer_email,
        created: inv.created.and_then(timestamp),
        due_date: inv.due_date.and_then(timestamp),
        hosted_invoice_url: inv.hosted_invoice_url,
        invoice_pdf: inv.invoice_pdf,
    }
}

fn charge_status(status: &ChargeStatus) -> &'static str {
    match status {
        ChargeStatus::Failed => "failed",
        ChargeStatus::Pending => "pending",
        ChargeStatus::Succeeded => "succeeded",
    }
}

/// `None` when Stripe sent a creation time chrono cannot represent
fn transaction_from_charge(charge: Charge) -> Option<Transaction> {
    let Some(created) = timestamp(charge.created) else {
        tracing::warn!(charge = %charge.id, created = charge.created, "Skipping charge with unusable timestamp");
        return None;
    };

    Some(Transaction {
        id: charge.id.to_string(),
        amount: charge.amount,
        amount_refunded: charge.amount_refunded,
        currency: charge.currency.to_string(),
        status: charge_status(&charge.status).to_string(),
        paid: charge.paid,
        description: charge.description,
        customer_email: charge.receipt_email,
        created,
    })
}

/// Only settled money counts towards revenue
fn revenue_sample(charge: &Charge) -> Option<RevenueSample> {
    if charge.status != ChargeStatus::Succeeded || !charge.paid {
        return None;
    }

    Some(RevenueSample {
        created: timestamp(charge.created)?,
        currency: charge.currency.to_string(),
        net_amount: charge.amount - charge.amount_refunded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripe::Currency;

    fn charge(created: i64) -> Charge {
        Charge {
            id: "ch_test".parse().unwrap(),
            amount: 2500,
            amount_refunded: 500,
            currency: Currency::EUR,
            status: ChargeStatus::Succeeded,
            paid: true,
            created,
            ..Default::default()
        }
    }

    #[test]
    fn charge_maps_to_transaction() {
        let txn = transaction_from_charge(charge(1_717_243_200)).unwrap();
        assert_eq!(txn.id, "ch_test");
        assert_eq!(txn.currency, "eur");
        assert_eq!(txn.status, "succeeded");
        assert_eq!(txn.created, timestamp(1_717_243_200).unwrap());
    }

    #[test]
    fn unrepresentable_charge_time_is_skipped() {
        assert!(transaction_from_charge(charge(i64::MAX)).is_none());
        assert!(revenue_sample(&charge(i64::MAX)).is_none());
    }

    #[test]
    fn revenue_sample_is_net_of_refunds() {
        assert_eq!(revenue_sample(&charge(1_717_243_200)).unwrap().net_amount, 2000);

        let mut pending = charge(1_717_243_200);
        pending.status = ChargeStatus::Pending;
        assert!(revenue_sample(&pending).is_none());
    }

    #[test]
    fn invoice_without_currency_stays_without_currency() {
        let invoice = stripe::Invoice {
            id: "in_test".parse().unwrap(),
            currency: None,
            status: Some(InvoiceStatus::Draft),
            ..Default::default()
        };

        let mapped = invoice_from_stripe(invoice);
        assert_eq!(mapped.currency, None);
        assert_eq!(mapped.status, "draft");
        assert_eq!(mapped.amount_due, 0);
    }
}
