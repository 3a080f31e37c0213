use pcl_types::Prediction;
use serde::{Deserialize, Serialize};

/// Current on-disk document version.
pub const DOCUMENT_VERSION: u32 = 1;

/// The persisted form of a ledger: the whole record collection plus the
/// bookkeeping needed to detect concurrent writers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    /// Format version, for forward-compatibility checks on load.
    pub version: u32,
    /// Monotonic write counter. Incremented by the backend on every
    /// successful save; compared on save to detect interleaved writers.
    pub generation: u64,
    /// The records, in insertion order.
    pub predictions: Vec<Prediction>,
}

impl LedgerDocument {
    /// The document a missing ledger file stands for.
    pub fn empty() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            generation: 0,
            predictions: Vec::new(),
        }
    }
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self::empty()
    }
}
