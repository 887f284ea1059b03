//! # AppStore
//!
//! The single authoritative owner of the application state. Every
//! mutation goes: validate/derive in `marketpro-core`, then persist the
//! whole state synchronously. By the time an operation returns, the new
//! state is both in memory and durably stored.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Startup Sequence                                  │
//! │                                                                         │
//! │  StateStorage.load()                                                    │
//! │       │                                                                 │
//! │       ├── Ok(None) ───────────────► full seed state                     │
//! │       │                                                                 │
//! │       ├── Ok(Some(blob))                                                │
//! │       │       │                                                         │
//! │       │       ├── parse fails ───► full seed state (warn! logged)       │
//! │       │       │                                                         │
//! │       │       └── parse ok ──────► per-collection fallback:             │
//! │       │                            each empty/missing collection        │
//! │       │                            replaced by its seed equivalent      │
//! │       │                                                                 │
//! │       └── always: current_user = None, then persist once                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sessions are never restored across loads: `current_user` appears in
//! the serialized shape but is unconditionally reset.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use marketpro_core::state::{AppState, NewCompany, NewInvoice, StorePolicy, UserAction};
use marketpro_core::types::{AppSettings, Company, Invoice, Product, User};
use marketpro_core::{seed, CredentialVerifier, Money, PlaintextCredentials};

use crate::error::StoreResult;
use crate::storage::StateStorage;

// =============================================================================
// Lenient Persisted Shape
// =============================================================================

/// What we are willing to accept from durable storage.
///
/// Every collection defaults to empty and `settings` to absent, so a
/// blob from an older version (or a partially wiped one) still parses;
/// the per-collection seed fallback then fills the gaps. Unknown fields
/// (like a stale `currentUser`) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedState {
    users: Vec<User>,
    companies: Vec<Company>,
    products: Vec<Product>,
    invoices: Vec<Invoice>,
    settings: Option<AppSettings>,
}

impl PersistedState {
    /// Applies the "never show an empty app" policy: each empty or
    /// missing top-level collection is individually replaced by its seed
    /// equivalent, and settings fall back independently.
    fn into_state(self) -> AppState {
        let users = fallback("users", self.users, seed::default_admin);
        let companies = fallback_vec("companies", self.companies, seed::seed_companies);
        let products = fallback_vec("products", self.products, seed::seed_products);
        let invoices = fallback_vec("invoices", self.invoices, seed::seed_invoices);
        let settings = self.settings.unwrap_or_else(|| {
            info!("settings missing from persisted state, using defaults");
            seed::default_settings()
        });

        AppState {
            users,
            current_user: None,
            companies,
            products,
            invoices,
            settings,
        }
    }
}

fn fallback<T>(name: &str, stored: Vec<T>, seed_one: fn() -> T) -> Vec<T> {
    if stored.is_empty() {
        info!(collection = name, "persisted collection empty, reseeding");
        vec![seed_one()]
    } else {
        stored
    }
}

fn fallback_vec<T>(name: &str, stored: Vec<T>, seed_all: fn() -> Vec<T>) -> Vec<T> {
    if stored.is_empty() {
        info!(collection = name, "persisted collection empty, reseeding");
        seed_all()
    } else {
        stored
    }
}

// =============================================================================
// AppStore
// =============================================================================

/// Owns the whole domain state and its persistence lifecycle.
///
/// ## Concurrency
/// Single-writer by construction: the store is `&mut self` throughout,
/// there are no background tasks, and each operation completes its
/// durable write before returning. Embedders that share a store across
/// threads wrap it in their own lock.
pub struct AppStore<S: StateStorage> {
    state: AppState,
    storage: S,
    policy: StorePolicy,
    verifier: Box<dyn CredentialVerifier + Send>,
}

impl<S: StateStorage> AppStore<S> {
    /// Opens the store with the default policy and plaintext credential
    /// comparison.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with(storage, StorePolicy::default(), Box::new(PlaintextCredentials))
    }

    /// Opens the store with explicit policy knobs and credential scheme.
    pub fn open_with(
        storage: S,
        policy: StorePolicy,
        verifier: Box<dyn CredentialVerifier + Send>,
    ) -> StoreResult<Self> {
        let state = match storage.load()? {
            None => {
                info!("no persisted state found, starting from seed");
                seed::initial_state()
            }
            Some(blob) => match serde_json::from_str::<PersistedState>(&blob) {
                Ok(persisted) => persisted.into_state(),
                Err(e) => {
                    // Recover locally; the user sees a working app, the
                    // log sees why their data went away.
                    warn!(error = %e, "persisted state unreadable, falling back to seed");
                    seed::initial_state()
                }
            },
        };

        let mut store = AppStore {
            state,
            storage,
            policy,
            verifier,
        };
        store.persist()?;
        Ok(store)
    }

    /// The current state snapshot. Views read from here after every
    /// operation.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The policy knobs this store was opened with.
    pub fn policy(&self) -> StorePolicy {
        self.policy
    }

    fn persist(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.state)?;
        self.storage.save(&blob)
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    /// Credential check. True and a persisted session on success; false
    /// and an untouched state on failure.
    pub fn login(&mut self, username: &str, password: &str) -> StoreResult<bool> {
        if self.state.login(username, password, self.verifier.as_ref()) {
            self.persist()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Clears the session. Idempotent.
    pub fn logout(&mut self) -> StoreResult<()> {
        self.state.logout();
        self.persist()
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Wholesale-replaces the settings.
    pub fn update_settings(&mut self, settings: AppSettings) -> StoreResult<()> {
        self.state.update_settings(settings);
        self.persist()
    }

    // -------------------------------------------------------------------------
    // Companies
    // -------------------------------------------------------------------------

    /// Appends a supplier with a store-assigned id and code.
    pub fn add_company(&mut self, data: NewCompany) -> StoreResult<Company> {
        let company = self.state.add_company(data);
        self.persist()?;
        Ok(company)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Upserts a product by barcode.
    pub fn upsert_product(&mut self, product: Product) -> StoreResult<()> {
        self.state.upsert_product(product);
        self.persist()
    }

    /// Adjusts a product's stock, clamped at zero. Unknown barcode is a
    /// no-op; the write still happens.
    pub fn adjust_stock(&mut self, barcode: &str, delta: i64) -> StoreResult<()> {
        self.state.adjust_stock(barcode, delta);
        self.persist()
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    /// Creates a purchase invoice (and its received-stock side effect)
    /// and returns the persisted record so callers can print it
    /// immediately.
    pub fn add_invoice(&mut self, data: NewInvoice) -> StoreResult<Invoice> {
        let invoice = self.state.add_invoice(data);
        self.persist()?;
        Ok(invoice)
    }

    /// Records a payment. Rejects non-positive amounts before anything
    /// is mutated or persisted; unknown invoice ids are silent no-ops.
    pub fn add_installment(&mut self, invoice_id: i64, amount: Money) -> StoreResult<()> {
        self.state
            .add_installment(invoice_id, amount, Utc::now(), &self.policy)?;
        self.persist()
    }

    /// Removes an invoice by id; unknown id is a no-op. Stock reversal
    /// follows the store's policy (off by default).
    pub fn delete_invoice(&mut self, id: i64) -> StoreResult<()> {
        self.state.delete_invoice(id, &self.policy);
        self.persist()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Adds, replaces, or removes a user record.
    pub fn manage_user(&mut self, user: User, action: UserAction) -> StoreResult<()> {
        self.state.manage_user(user, action);
        self.persist()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use marketpro_core::types::{InvoiceItem, InvoiceStatus};

    fn item(barcode: &str, price_cents: i64, quantity: i64) -> InvoiceItem {
        InvoiceItem {
            barcode: barcode.to_string(),
            name: format!("Product {barcode}"),
            quantity,
            wholesale_price_cents: price_cents,
            selling_price_cents: price_cents,
        }
    }

    fn order(items: Vec<InvoiceItem>, paid_cents: i64) -> NewInvoice {
        NewInvoice {
            company_id: "seed-co-100".to_string(),
            date: Utc::now(),
            items,
            paid_amount_cents: paid_cents,
            installments: vec![],
            is_received: false,
        }
    }

    #[test]
    fn test_fresh_install_seeds_and_persists() {
        let store = AppStore::open(MemoryStorage::new()).unwrap();

        assert_eq!(store.state().users.len(), 1);
        assert!(!store.state().companies.is_empty());
        assert!(!store.state().products.is_empty());
        assert!(!store.state().invoices.is_empty());

        // The seed was written back immediately
        let blob = store.storage.snapshot().unwrap();
        assert!(blob.contains("\"username\":\"admin\""));
    }

    #[test]
    fn test_every_mutation_persists_synchronously() {
        let mut store = AppStore::open(MemoryStorage::new()).unwrap();

        store
            .add_company(NewCompany {
                name: "Fresh Farms".to_string(),
                phone: String::new(),
                address: String::new(),
            })
            .unwrap();
        assert!(store.storage.snapshot().unwrap().contains("Fresh Farms"));

        store
            .update_settings(AppSettings {
                profit_margin_bps: 2000,
                app_name: "Renamed Market".to_string(),
            })
            .unwrap();
        assert!(store.storage.snapshot().unwrap().contains("Renamed Market"));
    }

    #[test]
    fn test_login_success_persists_session_failure_does_not() {
        let mut store = AppStore::open(MemoryStorage::new()).unwrap();

        assert!(!store.login("admin", "wrong").unwrap());
        assert!(store.state().current_user.is_none());

        assert!(store.login("admin", "admin").unwrap());
        assert_eq!(
            store.state().current_user.as_ref().unwrap().username,
            "admin"
        );
        // The session pointer is in the blob...
        assert!(store
            .storage
            .snapshot()
            .unwrap()
            .contains("\"currentUser\":{"));
    }

    #[test]
    fn test_session_not_restored_across_reload() {
        let storage = {
            let mut store = AppStore::open(MemoryStorage::new()).unwrap();
            store.login("admin", "admin").unwrap();
            MemoryStorage::preloaded(store.storage.snapshot().unwrap())
        };

        // ...but always discarded on the next load
        let reopened = AppStore::open(storage).unwrap();
        assert!(reopened.state().current_user.is_none());
    }

    #[test]
    fn test_invoice_lifecycle_through_store() {
        let mut store = AppStore::open(MemoryStorage::new()).unwrap();

        // $900.00 order, $500.00 down
        let invoice = store
            .add_invoice(order(vec![item("X-1", 90_000, 1)], 50_000))
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Partial);

        store
            .add_installment(invoice.id, Money::from_cents(40_000))
            .unwrap();
        let paid = store.state().invoice_by_id(invoice.id).unwrap();
        assert_eq!(paid.paid_amount_cents, 90_000);
        assert_eq!(paid.status, InvoiceStatus::Paid);

        store.delete_invoice(invoice.id).unwrap();
        assert!(store.state().invoice_by_id(invoice.id).is_none());
    }

    #[test]
    fn test_rejected_installment_mutates_nothing() {
        let mut store = AppStore::open(MemoryStorage::new()).unwrap();
        let invoice = store.add_invoice(order(vec![item("X-1", 1000, 1)], 0)).unwrap();
        let blob_before = store.storage.snapshot().unwrap();

        assert!(store.add_installment(invoice.id, Money::zero()).is_err());

        assert_eq!(store.storage.snapshot().unwrap(), blob_before);
        assert_eq!(
            store.state().invoice_by_id(invoice.id).unwrap().paid_amount_cents,
            0
        );
    }
}
