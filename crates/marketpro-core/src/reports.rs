//! # Reporting Derivations
//!
//! Pure read-only figures over [`AppState`], centralized so the
//! dashboard, printing, and any export agree on the numbers. Recomputing
//! these ad hoc per page is exactly how remaining-balance math ends up
//! diverging between screens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::state::AppState;
use crate::types::{Invoice, InvoiceStatus, Product};
use crate::LOW_STOCK_THRESHOLD;

/// The figures the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sum of invoice totals dated today.
    pub purchases_today_cents: i64,

    /// Number of invoices dated today.
    pub invoices_today: usize,

    /// Products with stock below the low-stock threshold.
    pub low_stock_count: usize,

    /// Invoices not yet fully paid.
    pub unpaid_invoice_count: usize,

    /// Sum of outstanding balances across unpaid invoices.
    pub outstanding_cents: i64,

    /// On-hand stock valued at wholesale cost.
    pub stock_value_cents: i64,
}

impl DashboardSummary {
    /// Computes the summary as of `now`.
    pub fn compute(state: &AppState, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let todays: Vec<&Invoice> = state
            .invoices
            .iter()
            .filter(|i| i.date.date_naive() == today)
            .collect();

        DashboardSummary {
            purchases_today_cents: todays
                .iter()
                .map(|i| i.total_value())
                .sum::<Money>()
                .cents(),
            invoices_today: todays.len(),
            low_stock_count: low_stock(state).count(),
            unpaid_invoice_count: unpaid_invoices(state).count(),
            outstanding_cents: outstanding_payables(state).cents(),
            stock_value_cents: stock_value(state).cents(),
        }
    }
}

/// Products whose quantity has dropped below [`LOW_STOCK_THRESHOLD`].
pub fn low_stock(state: &AppState) -> impl Iterator<Item = &Product> {
    state
        .products
        .iter()
        .filter(|p| p.quantity < LOW_STOCK_THRESHOLD)
}

/// Invoices that still carry an outstanding balance.
pub fn unpaid_invoices(state: &AppState) -> impl Iterator<Item = &Invoice> {
    state
        .invoices
        .iter()
        .filter(|i| i.status != InvoiceStatus::Paid)
}

/// Unpaid invoices whose payment term has elapsed.
pub fn overdue_invoices(state: &AppState, now: DateTime<Utc>) -> impl Iterator<Item = &Invoice> {
    state.invoices.iter().filter(move |i| i.is_overdue(now))
}

/// Total outstanding across unpaid invoices.
///
/// Overpaid invoices are `Paid` and excluded, so this never goes
/// negative.
pub fn outstanding_payables(state: &AppState) -> Money {
    unpaid_invoices(state).map(Invoice::remaining).sum()
}

/// On-hand stock valued at wholesale cost.
pub fn stock_value(state: &AppState) -> Money {
    state.products.iter().map(Product::stock_value).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
