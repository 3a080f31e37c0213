//! Calibration engine for PCL.
//!
//! A pure, deterministic scoring pass over a set of resolved predictions:
//! no mutation, no side effects, order-independent. The caller decides
//! which records to score (typically via the ledger's resolved-only
//! filter); passing an unresolved record is an error, never a silent skip.
//!
//! The calibration score is the Brier score: the mean of
//! `(confidence - y)²` where `y` is 1 for a true outcome and 0 for a
//! false one. 0 is perfect, 1 is maximally wrong, and an empty input has
//! no score at all (`None`, not 0).

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{score, BUCKET_COUNT};
pub use error::ScoreError;
pub use report::{CalibrationReport, ReliabilityBucket};
