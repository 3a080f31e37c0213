use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("confidence must be within [0, 1], got {value}")]
    ConfidenceOutOfRange { value: f64 },

    #[error("cannot parse '{0}' as a confidence (try 0.7, 70%, 7/10, or 1 in 3)")]
    UnparsableConfidence(String),

    #[error("invalid prediction id: {0}")]
    InvalidId(String),

    #[error("cannot parse '{0}' as a verdict (expected true or false)")]
    UnparsableVerdict(String),
}
