use chrono::{DateTime, Utc};
use pcl_types::PredictionId;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error("prediction not found: {0}")]
    NotFound(String),

    #[error("identifier '{0}' matches more than one prediction")]
    AmbiguousId(String),

    #[error("field '{field}' is immutable; only tags and proof can be edited")]
    ImmutableField { field: String },

    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("prediction {id} is already resolved")]
    AlreadyResolved { id: PredictionId },

    #[error("prediction {id} cannot be resolved before its term ({term_at}); pass --force to override")]
    PrematureResolution {
        id: PredictionId,
        term_at: DateTime<Utc>,
    },
}
