use pcl_ledger::{Ledger, TermPolicy};

use crate::backend::StorageBackend;
use crate::document::LedgerDocument;
use crate::error::StoreError;

/// One command invocation's view of the ledger: load on open, mutate in
/// memory, persist once with [`commit`](Self::commit).
///
/// A command that fails partway simply never commits, so the file reflects
/// either the whole operation or none of it. The generation observed at
/// open is carried through to the save, which is how an interleaved writer
/// is detected.
pub struct LedgerSession<B: StorageBackend> {
    backend: B,
    ledger: Ledger,
    generation: u64,
}

impl<B: StorageBackend> LedgerSession<B> {
    /// Load the persisted ledger through `backend`.
    pub fn open(backend: B, policy: TermPolicy) -> Result<Self, StoreError> {
        let document = backend.load()?;
        Ok(Self {
            backend,
            ledger: Ledger::from_records(document.predictions, policy),
            generation: document.generation,
        })
    }

    /// The in-memory ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The in-memory ledger, mutable. Changes are invisible to other
    /// processes until [`commit`](Self::commit).
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Persist the current ledger state, generation-checked.
    pub fn commit(&mut self) -> Result<(), StoreError> {
        let document = LedgerDocument {
            version: crate::document::DOCUMENT_VERSION,
            generation: self.generation,
            predictions: self.ledger.records().to_vec(),
        };
        self.backend.save(&document)?;
        self.generation += 1;
        Ok(())
    }
}
