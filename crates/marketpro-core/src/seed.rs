//! # Seed Data
//!
//! The fixed fallback dataset behind the "never show an empty app"
//! policy. On startup the persistence layer replaces any missing or
//! empty top-level collection with its seed equivalent — per collection,
//! not all-or-nothing — so a fresh install and a half-corrupted state
//! both present a workable application.
//!
//! Seed ids are stable literals (not generated) so the dataset is
//! deterministic across installs.

use chrono::{Duration, Utc};

use crate::state::AppState;
use crate::types::{
    expiry_for, AppSettings, Company, Installment, Invoice, InvoiceItem, InvoiceStatus, Product,
    Role, User, UserPermissions,
};

/// Default administrator: username `admin`, password `admin`, full
/// permissions. Exactly one such account exists in the seed.
pub fn default_admin() -> User {
    User {
        id: "admin-001".to_string(),
        name: "System Administrator".to_string(),
        username: "admin".to_string(),
        password: "admin".to_string(),
        role: Role::Admin,
        permissions: UserPermissions::all(),
    }
}

/// Default settings: 15% profit margin, "Supermarket Pro" label.
pub fn default_settings() -> AppSettings {
    AppSettings {
        profit_margin_bps: 1500,
        app_name: "Supermarket Pro".to_string(),
    }
}

/// Seed suppliers. Codes start at 100, matching the store's assignment
/// scheme, so the next generated code continues the sequence.
pub fn seed_companies() -> Vec<Company> {
    vec![
        Company {
            id: "seed-co-100".to_string(),
            code: 100,
            name: "Al Noor Trading".to_string(),
            phone: "0100-555-0101".to_string(),
            address: "14 Market Street".to_string(),
        },
        Company {
            id: "seed-co-101".to_string(),
            code: 101,
            name: "Golden Valley Foods".to_string(),
            phone: "0100-555-0102".to_string(),
            address: "3 Harbor Road".to_string(),
        },
    ]
}

/// Seed products, referencing the seed suppliers by id.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            barcode: "6221031490019".to_string(),
            name: "Rice 5kg".to_string(),
            company_id: "seed-co-100".to_string(),
            wholesale_price_cents: 2500,
            quantity: 40,
            category: Some("Groceries".to_string()),
            unit: Some("bag".to_string()),
            description: None,
        },
        Product {
            barcode: "6221031490026".to_string(),
            name: "Sunflower Oil 1L".to_string(),
            company_id: "seed-co-100".to_string(),
            wholesale_price_cents: 1800,
            quantity: 25,
            category: Some("Groceries".to_string()),
            unit: Some("bottle".to_string()),
            description: None,
        },
        Product {
            barcode: "6224008251118".to_string(),
            name: "Tea 250g".to_string(),
            company_id: "seed-co-101".to_string(),
            wholesale_price_cents: 1200,
            quantity: 60,
            category: Some("Beverages".to_string()),
            unit: Some("pack".to_string()),
            description: None,
        },
        Product {
            barcode: "6224008251125".to_string(),
            name: "Sugar 1kg".to_string(),
            company_id: "seed-co-101".to_string(),
            wholesale_price_cents: 900,
            quantity: 8,
            category: Some("Groceries".to_string()),
            unit: Some("bag".to_string()),
            description: None,
        },
    ]
}

/// One seed invoice, partially paid, consistent with the derivation
/// rules: total = Σ line totals, status follows paid vs total, expiry is
/// seven days after the invoice date.
pub fn seed_invoices() -> Vec<Invoice> {
    let date = Utc::now() - Duration::days(2);
    let items = vec![
        InvoiceItem {
            barcode: "6221031490019".to_string(),
            name: "Rice 5kg".to_string(),
            quantity: 10,
            wholesale_price_cents: 2500,
            selling_price_cents: 2875,
        },
        InvoiceItem {
            barcode: "6221031490026".to_string(),
            name: "Sunflower Oil 1L".to_string(),
            quantity: 5,
            wholesale_price_cents: 1800,
            selling_price_cents: 2070,
        },
    ];
    // 10 × $25.00 + 5 × $18.00 = $340.00; $100.00 paid so far
    vec![Invoice {
        id: 1000,
        company_id: "seed-co-100".to_string(),
        date,
        expiry_date: expiry_for(date),
        items,
        total_value_cents: 34_000,
        paid_amount_cents: 10_000,
        installments: vec![Installment {
            id: "seed-inst-001".to_string(),
            date,
            amount_cents: 10_000,
        }],
        is_received: true,
        status: InvoiceStatus::Partial,
    }]
}

/// The complete fallback state: one admin account, seed suppliers,
/// products, invoices, and default settings. No session.
pub fn initial_state() -> AppState {
    AppState {
        users: vec![default_admin()],
        current_user: None,
        companies: seed_companies(),
        products: seed_products(),
        invoices: seed_invoices(),
        settings: default_settings(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
