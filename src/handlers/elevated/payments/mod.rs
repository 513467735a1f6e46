// handlers/elevated/payments/mod.rs - Read-only views over the billing provider

pub mod invoice;         // GET /api/admin/payments/invoice/:id
pub mod revenue_chart;   // GET /api/admin/payments/revenue-chart
pub mod transaction;     // GET /api/admin/payments/transaction

pub use invoice::invoice_get;
pub use revenue_chart::revenue_chart_get;
pub use transaction::transaction_get;
