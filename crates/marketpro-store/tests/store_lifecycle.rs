//! End-to-end lifecycle tests against the file storage backend:
//! load, seed fallback, mutate, persist, reload.

use chrono::Utc;
use tempfile::tempdir;

use marketpro_core::state::{NewCompany, NewInvoice};
use marketpro_core::types::{InvoiceItem, InvoiceStatus};
use marketpro_core::Money;
use marketpro_store::{AppStore, FileStorage, StateStorage};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn item(barcode: &str, price_cents: i64, quantity: i64) -> InvoiceItem {
    InvoiceItem {
        barcode: barcode.to_string(),
        name: format!("Product {barcode}"),
        quantity,
        wholesale_price_cents: price_cents,
        selling_price_cents: price_cents,
    }
}

#[test]
fn full_round_trip_preserves_everything_but_the_session() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let (companies, products, invoices, users, settings) = {
        let mut store = AppStore::open(storage.clone()).unwrap();
        store.login("admin", "admin").unwrap();

        store
            .add_company(NewCompany {
                name: "Fresh Farms".to_string(),
                phone: "0100-555-0199".to_string(),
                address: "7 Orchard Lane".to_string(),
            })
            .unwrap();
        store
            .add_invoice(NewInvoice {
                company_id: "seed-co-101".to_string(),
                date: Utc::now(),
                items: vec![item("6224008251118", 1200, 20)],
                paid_amount_cents: 0,
                installments: vec![],
                is_received: true,
            })
            .unwrap();

        let s = store.state();
        (
            s.companies.clone(),
            s.products.clone(),
            s.invoices.clone(),
            s.users.clone(),
            s.settings.clone(),
        )
    };

    // Reopen from the same file: everything identical, session gone
    let reopened = AppStore::open(storage).unwrap();
    let s = reopened.state();
    assert_eq!(s.companies, companies);
    assert_eq!(s.products, products);
    assert_eq!(s.invoices, invoices);
    assert_eq!(s.users, users);
    assert_eq!(s.settings, settings);
    assert!(s.current_user.is_none());
}

#[test]
fn unreadable_blob_recovers_with_full_seed() {
    init_tracing();
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.save("{definitely not json").unwrap();

    let store = AppStore::open(storage.clone()).unwrap();
    assert_eq!(store.state().users.len(), 1);
    assert_eq!(store.state().users[0].username, "admin");
    assert!(!store.state().companies.is_empty());

    // The recovered seed replaced the broken blob on disk
    let healed = storage.load().unwrap().unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&healed).is_ok());
}

#[test]
fn empty_collections_are_reseeded_individually() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    // A blob with real products but empty/missing everything else
    storage
        .save(
            r#"{
                "users": [],
                "companies": [],
                "products": [{
                    "barcode": "CUSTOM-1",
                    "name": "Surviving Product",
                    "companyId": "ghost-co",
                    "wholesalePriceCents": 4200,
                    "quantity": 7
                }],
                "invoices": []
            }"#,
        )
        .unwrap();

    let store = AppStore::open(storage).unwrap();
    let s = store.state();

    // Kept: the non-empty collection, exactly as stored
    assert_eq!(s.products.len(), 1);
    assert_eq!(s.products[0].barcode, "CUSTOM-1");
    assert_eq!(s.products[0].quantity, 7);

    // Reseeded: each empty collection, independently
    assert_eq!(s.users.len(), 1);
    assert_eq!(s.users[0].username, "admin");
    assert!(!s.companies.is_empty());
    assert!(!s.invoices.is_empty());

    // Missing settings fall back on their own
    assert_eq!(s.settings.app_name, "Supermarket Pro");
    assert_eq!(s.settings.profit_margin_bps, 1500);

    // Dangling supplier reference on the kept product is tolerated
    assert_eq!(s.company_display_name("ghost-co"), "Unknown supplier");
}

#[test]
fn received_invoice_stock_survives_reload_and_deletion() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let invoice_id = {
        let mut store = AppStore::open(storage.clone()).unwrap();
        let before = store
            .state()
            .product_by_barcode("6221031490019")
            .unwrap()
            .quantity;

        let invoice = store
            .add_invoice(NewInvoice {
                company_id: "seed-co-100".to_string(),
                date: Utc::now(),
                items: vec![item("6221031490019", 2500, 12)],
                paid_amount_cents: 0,
                installments: vec![],
                is_received: true,
            })
            .unwrap();

        let after = store
            .state()
            .product_by_barcode("6221031490019")
            .unwrap()
            .quantity;
        assert_eq!(after, before + 12);
        invoice.id
    };

    let mut store = AppStore::open(storage).unwrap();
    let stocked = store
        .state()
        .product_by_barcode("6221031490019")
        .unwrap()
        .quantity;

    // Default policy: deleting the received invoice leaves stock alone
    store.delete_invoice(invoice_id).unwrap();
    assert!(store.state().invoice_by_id(invoice_id).is_none());
    assert_eq!(
        store
            .state()
            .product_by_barcode("6221031490019")
            .unwrap()
            .quantity,
        stocked
    );
}

#[test]
fn installments_persist_across_reload() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let invoice_id = {
        let mut store = AppStore::open(storage.clone()).unwrap();
        let invoice = store
            .add_invoice(NewInvoice {
                company_id: "seed-co-100".to_string(),
                date: Utc::now(),
                items: vec![item("PAY-1", 90_000, 1)],
                paid_amount_cents: 50_000,
                installments: vec![],
                is_received: false,
            })
            .unwrap();
        store
            .add_installment(invoice.id, Money::from_cents(40_000))
            .unwrap();
        invoice.id
    };

    let store = AppStore::open(storage).unwrap();
    let invoice = store.state().invoice_by_id(invoice_id).unwrap();
    assert_eq!(invoice.paid_amount_cents, 90_000);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert_eq!(invoice.installments.len(), 1);
    assert_eq!(invoice.installments[0].amount_cents, 40_000);
}

#[test]
fn invoice_ids_continue_past_persisted_max() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let first = {
        let mut store = AppStore::open(storage.clone()).unwrap();
        store
            .add_invoice(NewInvoice {
                company_id: "seed-co-100".to_string(),
                date: Utc::now(),
                items: vec![item("SEQ-1", 100, 1)],
                paid_amount_cents: 0,
                installments: vec![],
                is_received: false,
            })
            .unwrap()
            .id
    };

    let mut store = AppStore::open(storage).unwrap();
    let second = store
        .add_invoice(NewInvoice {
            company_id: "seed-co-100".to_string(),
            date: Utc::now(),
            items: vec![item("SEQ-2", 100, 1)],
            paid_amount_cents: 0,
            installments: vec![],
            is_received: false,
        })
        .unwrap()
        .id;

    assert_eq!(second, first + 1);
}

#[test]
fn company_codes_continue_past_persisted_max() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let first_code = {
        let mut store = AppStore::open(storage.clone()).unwrap();
        store
            .add_company(NewCompany {
                name: "First".to_string(),
                phone: String::new(),
                address: String::new(),
            })
            .unwrap()
            .code
    };

    let mut store = AppStore::open(storage).unwrap();
    let second_code = store
        .add_company(NewCompany {
            name: "Second".to_string(),
            phone: String::new(),
            address: String::new(),
        })
        .unwrap()
        .code;

    assert_eq!(second_code, first_code + 1);
}
