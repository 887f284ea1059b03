//! # marketpro-core: Pure Domain Logic for Supermarket Pro
//!
//! This crate is the heart of the back-office application. It owns the
//! domain model (users, suppliers, products, purchase invoices, settings)
//! and every mutation that keeps it consistent, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Supermarket Pro Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (TypeScript views)                    │   │
//! │  │   Login ──► Dashboard ──► Invoices ──► Stock ──► Admin          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ marketpro-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │  │  types  │ │  money  │ │  state  │ │validation│ │ reports │ │   │
//! │  │  │ Invoice │ │  Money  │ │ AppState│ │  rules   │ │dashboard│ │   │
//! │  │  │ Product │ │ margins │ │mutations│ │  checks  │ │ figures │ │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │  NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              marketpro-store (Persistence Layer)                │   │
//! │  │         JSON blob storage, seed fallback, AppStore              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Company, Product, Invoice, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`state`] - The `AppState` aggregate root and its mutation operations
//! - [`credentials`] - Credential verification seam (swap plaintext out here)
//! - [`seed`] - Built-in fallback dataset ("never show an empty app")
//! - [`validation`] - Additive input validation
//! - [`reports`] - Pure dashboard/reporting derivations over `AppState`
//! - [`error`] - Validation error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every mutation is a deterministic state transition
//! 2. **No I/O**: Storage, network, and file system access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Tolerant Reads**: Dangling references resolve to "unknown", never panic

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credentials;
pub mod error;
pub mod money;
pub mod reports;
pub mod seed;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use credentials::{CredentialVerifier, PlaintextCredentials};
pub use error::ValidationError;
pub use money::Money;
pub use state::{AppState, NewCompany, NewInvoice, StorePolicy, UserAction};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// First supplier code handed out by the store.
///
/// Codes are assigned by the store, never by callers, and are strictly
/// increasing: `max(existing codes, FIRST_COMPANY_CODE - 1) + 1`.
pub const FIRST_COMPANY_CODE: i64 = 100;

/// First purchase-invoice number handed out by the store.
///
/// Invoice ids follow the same scheme as company codes:
/// `max(existing ids, FIRST_INVOICE_ID - 1) + 1`.
pub const FIRST_INVOICE_ID: i64 = 1000;

/// Payment term applied to every purchase invoice.
///
/// The due date is always `invoice date + PAYMENT_TERM_DAYS`.
pub const PAYMENT_TERM_DAYS: i64 = 7;

/// Stock level below which a product counts as "low stock" on the dashboard.
pub const LOW_STOCK_THRESHOLD: i64 = 10;
