//! # Application State
//!
//! The `AppState` aggregate root and every mutation that keeps it
//! consistent. This is the authoritative in-memory model; the persistence
//! layer (`marketpro-store`) wraps it and writes it out after each change.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      State Mutation Flow                                │
//! │                                                                         │
//! │  View Action            Operation              State Change             │
//! │  ───────────            ─────────              ────────────             │
//! │  Login form ──────────► login() ─────────────► current_user = Some(u)   │
//! │  New supplier ────────► add_company() ───────► companies.push (code+1)  │
//! │  Scan product ────────► upsert_product() ────► replace-by-barcode       │
//! │  Receive goods ───────► adjust_stock() ──────► quantity = max(0, q+Δ)   │
//! │  New order ───────────► add_invoice() ───────► invoices.push + stock    │
//! │  Record payment ──────► add_installment() ───► paid += amt, re-derive   │
//! │  Remove order ────────► delete_invoice() ────► invoices.remove          │
//! │  Manage accounts ─────► manage_user() ───────► add / edit / delete      │
//! │                                                                         │
//! │  Every operation is a synchronous, single-writer transformation.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tolerant-Read Policy
//! Unknown invoice ids and unknown barcodes are silent no-ops, not errors.
//! Dangling `company_id` references resolve to [`UNKNOWN_SUPPLIER`] at
//! read time. This mirrors the observable behavior the views depend on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::credentials::CredentialVerifier;
use crate::error::ValidationResult;
use crate::money::Money;
use crate::types::{
    expiry_for, invoice_total, AppSettings, Company, Installment, Invoice, InvoiceItem,
    InvoiceStatus, Product, User,
};
use crate::validation::validate_installment_amount;
use crate::{FIRST_COMPANY_CODE, FIRST_INVOICE_ID};

/// Sentinel name for supplier references that no longer resolve.
pub const UNKNOWN_SUPPLIER: &str = "Unknown supplier";

// =============================================================================
// Aggregate Root
// =============================================================================

/// The entire application state.
///
/// ## Ownership
/// `AppState` exclusively owns all collections; nothing is shared outside
/// the store. `current_user` is a transient session pointer — it appears
/// in the serialized shape but is always reset to `None` on load.
///
/// ## Why Not a Global?
/// The state is an explicitly owned value so tests (and any future
/// embedding) can construct isolated instances; there is no ambient
/// singleton anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub users: Vec<User>,
    pub current_user: Option<User>,
    pub companies: Vec<Company>,
    pub products: Vec<Product>,
    pub invoices: Vec<Invoice>,
    pub settings: AppSettings,
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// Caller-supplied fields for a new supplier.
///
/// `id` and `code` are assigned by the store, never by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Caller-supplied fields for a new purchase invoice.
///
/// `id`, `expiry_date`, `total_value` and `status` are derived by the
/// store; the caller supplies the item snapshots and the initial payment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub company_id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
    /// Initial payment made at order time (may be zero).
    pub paid_amount_cents: i64,
    /// Payment records carried in at creation (usually empty).
    pub installments: Vec<Installment>,
    /// Whether the goods arrive immediately (increments stock).
    pub is_received: bool,
}

/// What to do with the user record passed to [`AppState::manage_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserAction {
    Add,
    Edit,
    Delete,
}

// =============================================================================
// Policy Knobs
// =============================================================================

/// Named policy choices for behaviors that have historically been
/// ambiguous (simplification or bug, nobody knows).
///
/// The defaults reproduce the historical behavior exactly; tests assert
/// both sides of each knob so a deliberate change stays deliberate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePolicy {
    /// When true (the default), installments may push `paid_amount`
    /// past `total_value`; the invoice simply keeps reporting `Paid`.
    /// When false, the recorded amount is clamped to the outstanding
    /// balance and a fully paid invoice ignores further installments.
    pub allow_overpayment: bool,

    /// When false (the default), deleting a received invoice does
    /// NOT decrement the stock it added — a documented asymmetry.
    /// When true, the item quantities are reversed (clamped at zero)
    /// before the invoice is removed.
    pub reverse_stock_on_delete: bool,
}

impl Default for StorePolicy {
    fn default() -> Self {
        StorePolicy {
            allow_overpayment: true,
            reverse_stock_on_delete: false,
        }
    }
}

// =============================================================================
// Mutation Operations
// =============================================================================

impl AppState {
    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    /// Attempts a login with the given credentials.
    ///
    /// On success sets `current_user` and returns true. On failure the
    /// state is unchanged and false is returned — invalid credentials are
    /// a boolean outcome, never an error. There is no lockout and no
    /// session token; this is a local single-process check.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        verifier: &dyn CredentialVerifier,
    ) -> bool {
        let matched = self
            .users
            .iter()
            .find(|u| u.username == username && verifier.verify(u, password))
            .cloned();

        match matched {
            Some(user) => {
                self.current_user = Some(user);
                true
            }
            None => false,
        }
    }

    /// Clears the session. Idempotent.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Wholesale-replaces the settings entity.
    ///
    /// The caller is trusted; range checks live in [`crate::validation`]
    /// for callers that want them.
    pub fn update_settings(&mut self, settings: AppSettings) {
        self.settings = settings;
    }

    // -------------------------------------------------------------------------
    // Companies
    // -------------------------------------------------------------------------

    /// Appends a new supplier with a store-assigned id and code.
    ///
    /// The code is `max(existing codes, FIRST_COMPANY_CODE - 1) + 1`, so
    /// the first generated code is 100 and codes are strictly increasing
    /// and never reused.
    pub fn add_company(&mut self, data: NewCompany) -> Company {
        let last_code = self
            .companies
            .iter()
            .map(|c| c.code)
            .max()
            .unwrap_or(FIRST_COMPANY_CODE - 1)
            .max(FIRST_COMPANY_CODE - 1);

        let company = Company {
            id: Uuid::new_v4().to_string(),
            code: last_code + 1,
            name: data.name,
            phone: data.phone,
            address: data.address,
        };
        self.companies.push(company.clone());
        company
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Upserts a product by barcode.
    ///
    /// Any existing product with the same barcode is removed and the new
    /// record appended last. The reorder is intentional: list order is
    /// display order in the views.
    pub fn upsert_product(&mut self, product: Product) {
        self.products.retain(|p| p.barcode != product.barcode);
        self.products.push(product);
    }

    /// Adds `delta` (positive or negative) to a product's quantity,
    /// clamped at a floor of zero. Unknown barcode is a silent no-op.
    pub fn adjust_stock(&mut self, barcode: &str, delta: i64) {
        if let Some(product) = self.products.iter_mut().find(|p| p.barcode == barcode) {
            product.quantity = (product.quantity + delta).max(0);
        }
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    /// Creates a purchase invoice and returns the persisted record.
    ///
    /// Derived on creation:
    /// - `id`: `max(existing ids, FIRST_INVOICE_ID - 1) + 1`
    /// - `expiry_date`: `date + PAYMENT_TERM_DAYS`
    /// - `total_value`: sum of line totals (the one derivation point)
    /// - `status`: via [`InvoiceStatus::derive`]
    ///
    /// When `is_received` is true, each item's quantity is added to the
    /// matching product's stock as a second step after the invoice write,
    /// joined by barcode. Items whose barcode matches no product have no
    /// stock effect — products are never auto-created.
    pub fn add_invoice(&mut self, data: NewInvoice) -> Invoice {
        let next_id = self
            .invoices
            .iter()
            .map(|i| i.id)
            .max()
            .unwrap_or(FIRST_INVOICE_ID - 1)
            .max(FIRST_INVOICE_ID - 1)
            + 1;

        let total = invoice_total(&data.items);
        let paid = Money::from_cents(data.paid_amount_cents);

        let invoice = Invoice {
            id: next_id,
            company_id: data.company_id,
            date: data.date,
            expiry_date: expiry_for(data.date),
            items: data.items,
            total_value_cents: total.cents(),
            paid_amount_cents: paid.cents(),
            installments: data.installments,
            is_received: data.is_received,
            status: InvoiceStatus::derive(paid, total),
        };
        self.invoices.push(invoice.clone());

        // Stock side effect, sequenced after the invoice write.
        if invoice.is_received {
            for item in &invoice.items {
                self.adjust_stock(&item.barcode, item.quantity);
            }
        }

        invoice
    }

    /// Records a payment against an invoice.
    ///
    /// Requires `amount > 0` (explicit rejection). An unknown invoice id
    /// is a silent no-op, per the tolerant-read policy. On success the
    /// paid amount grows, status is re-derived through the same rule as
    /// creation, and a fresh installment record is appended.
    ///
    /// Overpayment handling follows `policy.allow_overpayment`; see
    /// [`StorePolicy`].
    pub fn add_installment(
        &mut self,
        invoice_id: i64,
        amount: Money,
        at: DateTime<Utc>,
        policy: &StorePolicy,
    ) -> ValidationResult<()> {
        validate_installment_amount(amount)?;

        let Some(invoice) = self.invoices.iter_mut().find(|i| i.id == invoice_id) else {
            return Ok(());
        };

        let applied = if policy.allow_overpayment {
            amount
        } else {
            // Clamp to the outstanding balance; a settled invoice takes
            // no further payments.
            let remaining = invoice.remaining();
            if !remaining.is_positive() {
                return Ok(());
            }
            amount.min(remaining)
        };

        invoice.paid_amount_cents += applied.cents();
        invoice.status = InvoiceStatus::derive(invoice.paid_amount(), invoice.total_value());
        invoice.installments.push(Installment {
            id: Uuid::new_v4().to_string(),
            date: at,
            amount_cents: applied.cents(),
        });

        Ok(())
    }

    /// Removes an invoice by id. Unknown id is a silent no-op.
    ///
    /// Whether previously received stock is decremented back follows
    /// `policy.reverse_stock_on_delete`; off by default.
    pub fn delete_invoice(&mut self, id: i64, policy: &StorePolicy) {
        let Some(pos) = self.invoices.iter().position(|i| i.id == id) else {
            return;
        };
        let invoice = self.invoices.remove(pos);

        if policy.reverse_stock_on_delete && invoice.is_received {
            for item in &invoice.items {
                self.adjust_stock(&item.barcode, -item.quantity);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Adds, wholesale-replaces, or removes a user record.
    ///
    /// The caller supplies the complete record including its id. The
    /// store layer offers no protection against deleting the last
    /// administrator or the logged-in user — any such guard is a view
    /// concern.
    pub fn manage_user(&mut self, user: User, action: UserAction) {
        match action {
            UserAction::Add => self.users.push(user),
            UserAction::Edit => {
                if let Some(existing) = self.users.iter_mut().find(|u| u.id == user.id) {
                    *existing = user;
                }
            }
            UserAction::Delete => self.users.retain(|u| u.id != user.id),
        }
    }

    // -------------------------------------------------------------------------
    // Tolerant Lookups
    // -------------------------------------------------------------------------

    /// Resolves a supplier reference, if it still exists.
    pub fn company_by_id(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Supplier display name, with the "unknown" sentinel for dangling
    /// references. Every consumer (views, printing) resolves through
    /// this so they agree.
    pub fn company_display_name(&self, id: &str) -> &str {
        self.company_by_id(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_SUPPLIER)
    }

    /// Looks up a product by its barcode.
    pub fn product_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.barcode == barcode)
    }

    /// Looks up an invoice by id.
    pub fn invoice_by_id(&self, id: i64) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
