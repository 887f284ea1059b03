//! # marketpro-store: Persistence Layer for Supermarket Pro
//!
//! Wraps the pure [`marketpro_core::AppState`] with a durable-storage
//! lifecycle: load (with per-collection seed fallback), mutate, persist.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Data Flow                                   │
//! │                                                                         │
//! │  View invokes operation                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  AppStore (store.rs)                            │   │
//! │  │                                                                 │   │
//! │  │   mutate AppState  ──►  serialize  ──►  StateStorage.save()    │   │
//! │  │   (marketpro-core)      (serde_json)    (storage.rs)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One JSON blob under the fixed key "supermarket_pro_state_v2"          │
//! │                                                                         │
//! │  Writes are synchronous: when an operation returns, the new state      │
//! │  is both in memory and on disk (single-writer discipline).             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - The `StateStorage` trait plus file and in-memory backends
//! - [`store`] - `AppStore`: load/seed/persist lifecycle and operations
//! - [`error`] - Storage error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::StoreError;
pub use storage::{FileStorage, MemoryStorage, StateStorage, STORAGE_KEY};
pub use store::AppStore;
