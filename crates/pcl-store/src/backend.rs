use std::sync::Mutex;

use crate::document::LedgerDocument;
use crate::error::StoreError;

/// Load-all/save-all boundary over a durable medium.
///
/// All implementations must satisfy these invariants:
/// - `load` returns an empty document (generation 0) when nothing has ever
///   been saved, and an error (never a silent reset) when the medium holds
///   something unreadable.
/// - `save` persists the document with its generation incremented, but only
///   if the currently persisted generation equals `document.generation`
///   (the generation the caller loaded). Otherwise it fails with
///   [`StoreError::ConcurrentModification`] and persists nothing.
/// - A failed save leaves the previously persisted document fully intact.
pub trait StorageBackend {
    /// Read the persisted document.
    fn load(&self) -> Result<LedgerDocument, StoreError>;

    /// Persist the document, generation-checked as described above.
    fn save(&self, document: &LedgerDocument) -> Result<(), StoreError>;
}

impl<B: StorageBackend> StorageBackend for &B {
    fn load(&self) -> Result<LedgerDocument, StoreError> {
        (**self).load()
    }

    fn save(&self, document: &LedgerDocument) -> Result<(), StoreError> {
        (**self).save(document)
    }
}

/// In-memory backend for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<LedgerDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStore {
    fn load(&self) -> Result<LedgerDocument, StoreError> {
        Ok(self.inner.lock().expect("memory store mutex poisoned").clone())
    }

    fn save(&self, document: &LedgerDocument) -> Result<(), StoreError> {
        let mut current = self.inner.lock().expect("memory store mutex poisoned");
        if current.generation != document.generation {
            return Err(StoreError::ConcurrentModification {
                loaded: document.generation,
                found: current.generation,
            });
        }
        let mut persisted = document.clone();
        persisted.generation += 1;
        *current = persisted;
        Ok(())
    }
}
