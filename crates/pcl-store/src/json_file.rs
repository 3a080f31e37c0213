use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::StorageBackend;
use crate::document::{LedgerDocument, DOCUMENT_VERSION};
use crate::error::StoreError;

/// File-backed storage: one pretty-printed JSON document per ledger.
///
/// Saves are atomic: the document is written to a temporary file in the
/// target directory and renamed over the ledger file, so readers never see
/// a partial write. The generation check runs against a fresh read of the
/// file immediately before the rename.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The ledger file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<LedgerDocument, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "ledger file missing, starting empty");
                return Ok(LedgerDocument::empty());
            }
            Err(e) => return Err(e.into()),
        };

        let document: LedgerDocument =
            serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        if document.version > DOCUMENT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: document.version,
                supported: DOCUMENT_VERSION,
            });
        }
        Ok(document)
    }
}

impl StorageBackend for JsonFileStore {
    fn load(&self) -> Result<LedgerDocument, StoreError> {
        let document = self.read_document()?;
        debug!(
            path = %self.path.display(),
            generation = document.generation,
            records = document.predictions.len(),
            "ledger loaded"
        );
        Ok(document)
    }

    fn save(&self, document: &LedgerDocument) -> Result<(), StoreError> {
        let on_disk = self.read_document()?;
        if on_disk.generation != document.generation {
            return Err(StoreError::ConcurrentModification {
                loaded: document.generation,
                found: on_disk.generation,
            });
        }

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut persisted = document.clone();
        persisted.generation += 1;
        persisted.version = DOCUMENT_VERSION;
        let json = serde_json::to_string_pretty(&persisted)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let temp = tempfile::NamedTempFile::new_in(&parent)?;
        fs::write(temp.path(), json.as_bytes())?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(
            path = %self.path.display(),
            generation = persisted.generation,
            records = persisted.predictions.len(),
            "ledger saved"
        );
        Ok(())
    }
}
