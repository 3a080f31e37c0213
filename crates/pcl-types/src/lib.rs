//! Foundation types for the Prediction Calibration Ledger (PCL).
//!
//! This crate provides the value types shared by every other PCL crate.
//!
//! # Key Types
//!
//! - [`PredictionId`] — Time-ordered unique identifier (UUID v7)
//! - [`Confidence`] — Validated probability in the closed interval [0, 1]
//! - [`Verdict`] — Binary realized outcome of a resolved prediction
//! - [`Outcome`] — Resolution state machine (unresolved → resolved, once)
//! - [`Prediction`] — A single ledger record
//! - [`PredictionDraft`] — Caller-supplied creation payload
//! - [`Status`] — Derived lifecycle phase (future / pending / resolved)

pub mod confidence;
pub mod error;
pub mod id;
pub mod outcome;
pub mod prediction;

pub use confidence::Confidence;
pub use error::TypeError;
pub use id::PredictionId;
pub use outcome::{Outcome, Verdict};
pub use prediction::{normalize_tag, normalize_tags, Prediction, PredictionDraft, Status};
