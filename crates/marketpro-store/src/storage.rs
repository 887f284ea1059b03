//! # Storage Backends
//!
//! The durable-storage record is a single JSON blob under a fixed,
//! namespaced key. The [`StateStorage`] trait keeps the store agnostic
//! about where that blob lives: a file in the app-data directory in
//! production, an in-memory slot in tests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::StoreResult;

/// The fixed storage key the whole state lives under.
///
/// Versioned so a future breaking change to the blob shape can migrate
/// by key instead of guessing.
pub const STORAGE_KEY: &str = "supermarket_pro_state_v2";

// =============================================================================
// StateStorage Trait
// =============================================================================

/// One load/save slot for the serialized application state.
///
/// ## Contract
/// - `load` returns `Ok(None)` when nothing has ever been saved; a blob
///   that exists but fails to *parse* is the store's problem, not the
///   backend's.
/// - `save` replaces the previous blob atomically from the caller's
///   point of view: a reader never observes a half-written state.
pub trait StateStorage {
    /// Reads the persisted blob, if any.
    fn load(&self) -> StoreResult<Option<String>>;

    /// Durably replaces the blob.
    fn save(&self, blob: &str) -> StoreResult<()>;
}

// =============================================================================
// File Storage
// =============================================================================

/// File-backed storage: `<dir>/supermarket_pro_state_v2.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so
/// a crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage under the given directory, using the fixed key as the
    /// file name. The directory is created on first save if missing.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FileStorage {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Storage at an explicit file path (tests, unusual layouts).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    /// The file this backend reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for FileStorage {
    fn load(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, blob: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash never clobbers the previous state.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), bytes = blob.len(), "state persisted");
        Ok(())
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage for tests: one mutex-guarded slot.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// An empty slot (fresh install).
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// A slot preloaded with a blob, as if a previous session saved it.
    pub fn preloaded(blob: impl Into<String>) -> Self {
        MemoryStorage {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Snapshot of the currently stored blob.
    pub fn snapshot(&self) -> Option<String> {
        self.blob.lock().expect("storage mutex poisoned").clone()
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> StoreResult<Option<String>> {
        Ok(self.blob.lock().expect("storage mutex poisoned").clone())
    }

    fn save(&self, blob: &str) -> StoreResult<()> {
        *self.blob.lock().expect("storage mutex poisoned") = Some(blob.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
