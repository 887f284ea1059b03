//! # Domain Types
//!
//! Core domain types for the supermarket back-office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Company      │   │    Product      │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (generated) │   │  barcode (KEY)  │   │  id (from 1000) │       │
//! │  │  code (>= 100)  │◄──│  company_id     │   │  company_id     │       │
//! │  │  name, phone    │   │  wholesale ¢    │   │  items (frozen) │       │
//! │  └─────────────────┘   │  quantity       │   │  status derived │       │
//! │                        └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────▼────────┐       │
//! │  │      User       │   │  InvoiceStatus  │   │   Installment   │       │
//! │  │  role + flags   │   │  Pending        │   │  append-only    │       │
//! │  └─────────────────┘   │  Partial / Paid │   │  payment record │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference Semantics
//! `company_id` and `barcode` references are plain identifier fields, never
//! enforced as foreign keys. A dangling reference resolves to an "unknown"
//! sentinel at read time instead of failing — see [`crate::state::AppState`]
//! lookup helpers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::PAYMENT_TERM_DAYS;

// =============================================================================
// Roles & Permissions
// =============================================================================

/// Account role. Admins bypass per-capability flags entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// A named capability the view layer gates pages on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Dashboard,
    CreateOrder,
    Stock,
    BarcodePrinting,
    Companies,
    Inventory,
    Sales,
    Admin,
}

/// Per-user capability flags.
///
/// These are the *stored* flags. Effective access also depends on the
/// account role: an admin is granted every capability regardless of what
/// is stored here — use [`User::can`] for the effective check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    pub dashboard: bool,
    pub create_order: bool,
    pub stock: bool,
    pub barcode_printing: bool,
    pub companies: bool,
    pub inventory: bool,
    pub sales: bool,
    pub admin: bool,
}

impl UserPermissions {
    /// Every capability enabled, including admin.
    pub const fn all() -> Self {
        UserPermissions {
            dashboard: true,
            create_order: true,
            stock: true,
            barcode_printing: true,
            companies: true,
            inventory: true,
            sales: true,
            admin: true,
        }
    }

    /// Default template for newly created non-admin accounts:
    /// everything except the admin page.
    pub const fn standard() -> Self {
        UserPermissions {
            dashboard: true,
            create_order: true,
            stock: true,
            barcode_printing: true,
            companies: true,
            inventory: true,
            sales: true,
            admin: false,
        }
    }

    /// Returns the stored flag for a capability.
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Dashboard => self.dashboard,
            Capability::CreateOrder => self.create_order,
            Capability::Stock => self.stock,
            Capability::BarcodePrinting => self.barcode_printing,
            Capability::Companies => self.companies,
            Capability::Inventory => self.inventory,
            Capability::Sales => self.sales,
            Capability::Admin => self.admin,
        }
    }
}

impl Default for UserPermissions {
    fn default() -> Self {
        UserPermissions::standard()
    }
}

// =============================================================================
// User
// =============================================================================

/// A back-office account.
///
/// ## Security Note
/// The password is stored and compared in **plaintext**, for
/// compatibility with existing persisted state blobs. This is a known
/// defect, not a design choice. The comparison itself is isolated behind
/// [`crate::credentials::CredentialVerifier`] so a hashed scheme can be
/// swapped in without touching the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Login name (unique, case-sensitive).
    pub username: String,

    /// Plaintext password (see Security Note above).
    pub password: String,

    /// Account role.
    pub role: Role,

    /// Stored capability flags.
    pub permissions: UserPermissions,
}

impl User {
    /// Effective capability check: admin role implies every capability,
    /// regardless of the stored flags.
    pub fn can(&self, capability: Capability) -> bool {
        self.role == Role::Admin || self.permissions.allows(capability)
    }
}

// =============================================================================
// Company (Supplier)
// =============================================================================

/// A supplier record.
///
/// The `code` is a human-facing sequential number assigned by the store
/// (starting at [`crate::FIRST_COMPANY_CODE`]); it is never supplied by a
/// caller and never reused. The `id` is the internal key that products and
/// invoices reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub code: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
}

// =============================================================================
// Product
// =============================================================================

/// A stocked item, keyed by barcode.
///
/// The barcode *is* the primary identifier: re-adding a product with an
/// existing barcode replaces the prior record (upsert semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Primary identifier (EAN-13, UPC-A, or in-store code).
    pub barcode: String,

    /// Display name.
    pub name: String,

    /// Supplier reference (dangling tolerated, resolved at read time).
    pub company_id: String,

    /// Wholesale cost per unit, in cents.
    pub wholesale_price_cents: i64,

    /// On-hand quantity. Never driven below zero by any mutation.
    pub quantity: i64,

    /// Optional grouping label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Optional sales unit ("piece", "kg", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Optional free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Returns the wholesale price as Money.
    #[inline]
    pub fn wholesale_price(&self) -> Money {
        Money::from_cents(self.wholesale_price_cents)
    }

    /// Suggested selling price under the given settings:
    /// `wholesale × (1 + margin)`.
    ///
    /// Centralized here so pricing, printing, and reporting all agree.
    pub fn selling_price(&self, settings: &AppSettings) -> Money {
        self.wholesale_price().apply_margin_bps(settings.profit_margin_bps)
    }

    /// Value of the on-hand stock at wholesale cost.
    pub fn stock_value(&self) -> Money {
        self.wholesale_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Invoice Status
// =============================================================================

/// Payment status of a purchase invoice.
///
/// Always derived from `paid_amount` vs `total_value`, never set directly
/// by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InvoiceStatus {
    /// Nothing paid yet.
    Pending,
    /// Partially paid.
    Partial,
    /// Fully paid (or overpaid).
    Paid,
}

impl InvoiceStatus {
    /// The single derivation rule for invoice status.
    ///
    /// ```text
    /// paid >= total  ⇒ Paid      (a zero-total invoice is Paid)
    /// 0 < paid < total ⇒ Partial
    /// paid == 0      ⇒ Pending
    /// ```
    pub fn derive(paid: Money, total: Money) -> Self {
        if paid >= total {
            InvoiceStatus::Paid
        } else if paid.is_positive() {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Pending
        }
    }
}

// =============================================================================
// Invoice Item
// =============================================================================

/// A line item on a purchase invoice.
///
/// Uses the snapshot pattern: name and prices are copied from the product
/// at invoice time and stay frozen even if the live product changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Join key back to the live product (for stock adjustments).
    pub barcode: String,

    /// Product name at invoice time (frozen).
    pub name: String,

    /// Quantity purchased.
    pub quantity: i64,

    /// Wholesale price per unit at invoice time (frozen).
    pub wholesale_price_cents: i64,

    /// Suggested selling price at invoice time (frozen).
    pub selling_price_cents: i64,
}

impl InvoiceItem {
    /// Line total: `wholesale price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.wholesale_price_cents).multiply_quantity(self.quantity)
    }
}

/// Invoice total: sum of line totals.
///
/// This is the one place the total is computed; `add_invoice` freezes the
/// result onto the invoice.
pub fn invoice_total(items: &[InvoiceItem]) -> Money {
    items.iter().map(InvoiceItem::line_total).sum()
}

// =============================================================================
// Installment
// =============================================================================

/// One partial payment applied to an invoice's outstanding balance.
/// Append-only child of exactly one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: String,

    /// When the payment was recorded.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Payment amount in cents (always positive).
    pub amount_cents: i64,
}

impl Installment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A purchase transaction from a supplier.
///
/// Once created, `items` and `total_value_cents` are immutable; only
/// `paid_amount_cents`, `status`, and `installments` evolve, and only
/// through the installment operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Sequential id, starting at [`crate::FIRST_INVOICE_ID`].
    pub id: i64,

    /// Supplier reference (dangling tolerated).
    pub company_id: String,

    /// Creation timestamp.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Payment due date: `date + PAYMENT_TERM_DAYS`.
    #[ts(as = "String")]
    pub expiry_date: DateTime<Utc>,

    /// Frozen line-item snapshots.
    pub items: Vec<InvoiceItem>,

    /// Frozen total: sum of line totals at creation.
    pub total_value_cents: i64,

    /// Cumulative amount paid so far.
    pub paid_amount_cents: i64,

    /// Append-only payment history.
    pub installments: Vec<Installment>,

    /// Whether stock was incremented immediately on creation.
    pub is_received: bool,

    /// Derived payment status — see [`InvoiceStatus::derive`].
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Returns the frozen total as Money.
    #[inline]
    pub fn total_value(&self) -> Money {
        Money::from_cents(self.total_value_cents)
    }

    /// Returns the cumulative paid amount as Money.
    #[inline]
    pub fn paid_amount(&self) -> Money {
        Money::from_cents(self.paid_amount_cents)
    }

    /// Outstanding balance: `total − paid`. Negative when overpaid.
    pub fn remaining(&self) -> Money {
        self.total_value() - self.paid_amount()
    }

    /// Whether the payment term has elapsed without full payment.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != InvoiceStatus::Paid && now > self.expiry_date
    }
}

/// Due-date derivation shared by invoice creation paths.
pub fn expiry_for(date: DateTime<Utc>) -> DateTime<Utc> {
    date + Duration::days(PAYMENT_TERM_DAYS)
}

// =============================================================================
// Settings
// =============================================================================

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Profit margin in basis points (1500 = 15%).
    ///
    /// Applied to wholesale prices to derive suggested selling prices.
    pub profit_margin_bps: u32,

    /// Display label for the application. No semantic effect elsewhere.
    pub app_name: String,
}

impl AppSettings {
    /// Suggested selling price for a wholesale amount under these settings.
    pub fn selling_price(&self, wholesale: Money) -> Money {
        wholesale.apply_margin_bps(self.profit_margin_bps)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn settings(margin_bps: u32) -> AppSettings {
        AppSettings {
            profit_margin_bps: margin_bps,
            app_name: "Test Market".to_string(),
        }
    }

    #[test]
    fn test_status_derivation() {
        let m = Money::from_cents;
        assert_eq!(InvoiceStatus::derive(m(0), m(90_000)), InvoiceStatus::Pending);
        assert_eq!(InvoiceStatus::derive(m(50_000), m(90_000)), InvoiceStatus::Partial);
        assert_eq!(InvoiceStatus::derive(m(90_000), m(90_000)), InvoiceStatus::Paid);
        // Overpayment still reports Paid
        assert_eq!(InvoiceStatus::derive(m(95_000), m(90_000)), InvoiceStatus::Paid);
        // A zero-total invoice is Paid from the start
        assert_eq!(InvoiceStatus::derive(m(0), m(0)), InvoiceStatus::Paid);
    }

    #[test]
    fn test_invoice_total() {
        let items = vec![
            InvoiceItem {
                barcode: "100".to_string(),
                name: "A".to_string(),
                quantity: 3,
                wholesale_price_cents: 250,
                selling_price_cents: 288,
            },
            InvoiceItem {
                barcode: "200".to_string(),
                name: "B".to_string(),
                quantity: 2,
                wholesale_price_cents: 1000,
                selling_price_cents: 1150,
            },
        ];
        assert_eq!(invoice_total(&items).cents(), 3 * 250 + 2 * 1000);
        assert_eq!(invoice_total(&[]).cents(), 0);
    }

    #[test]
    fn test_expiry_is_seven_days_out() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let expiry = expiry_for(date);
        assert_eq!(expiry, Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_selling_price_uses_margin() {
        let product = Product {
            barcode: "6221031490019".to_string(),
            name: "Rice 5kg".to_string(),
            company_id: "co-1".to_string(),
            wholesale_price_cents: 2000,
            quantity: 10,
            category: None,
            unit: None,
            description: None,
        };
        assert_eq!(product.selling_price(&settings(1500)).cents(), 2300);
        assert_eq!(product.selling_price(&settings(0)).cents(), 2000);
        assert_eq!(product.stock_value().cents(), 20_000);
    }

    #[test]
    fn test_admin_role_implies_all_capabilities() {
        let mut user = User {
            id: "u-1".to_string(),
            name: "Admin".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            role: Role::Admin,
            permissions: UserPermissions {
                dashboard: false,
                create_order: false,
                stock: false,
                barcode_printing: false,
                companies: false,
                inventory: false,
                sales: false,
                admin: false,
            },
        };

        // Admin bypasses every stored flag
        assert!(user.can(Capability::Sales));
        assert!(user.can(Capability::Admin));

        // A plain user falls back to the stored flags
        user.role = Role::User;
        assert!(!user.can(Capability::Sales));

        user.permissions = UserPermissions::standard();
        assert!(user.can(Capability::Sales));
        assert!(!user.can(Capability::Admin));
    }

    #[test]
    fn test_remaining_and_overdue() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let invoice = Invoice {
            id: 1000,
            company_id: "co-1".to_string(),
            date,
            expiry_date: expiry_for(date),
            items: vec![],
            total_value_cents: 90_000,
            paid_amount_cents: 50_000,
            installments: vec![],
            is_received: false,
            status: InvoiceStatus::Partial,
        };

        assert_eq!(invoice.remaining().cents(), 40_000);
        assert!(!invoice.is_overdue(date + Duration::days(3)));
        assert!(invoice.is_overdue(date + Duration::days(8)));
    }

    #[test]
    fn test_status_serializes_as_plain_variant_name() {
        // The persisted blob stores "Pending" / "Partial" / "Paid"
        assert_eq!(serde_json::to_string(&InvoiceStatus::Paid).unwrap(), "\"Paid\"");
        let parsed: InvoiceStatus = serde_json::from_str("\"Partial\"").unwrap();
        assert_eq!(parsed, InvoiceStatus::Partial);
    }
}
