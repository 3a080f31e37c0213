//! Prediction ledger for PCL.
//!
//! This crate is the heart of the system. It owns the record collection
//! and enforces the lifecycle invariants:
//! - ids are assigned once and never reused
//! - `statement`, `confidence`, `created_at`, and `term_at` are fixed at
//!   creation; only `tags` and `proof` may be edited
//! - a prediction resolves at most once, and (by default) not before its
//!   term
//! - deletion is unconditional and irreversible
//!
//! Time is injected: operations that need the current time take it as an
//! argument, so one command invocation observes one consistent clock and
//! tests control time directly.

pub mod edit;
pub mod error;
pub mod filter;
pub mod ledger;

pub use edit::FieldEdit;
pub use error::LedgerError;
pub use filter::{Filter, OutcomeFilter};
pub use ledger::{Ledger, TermPolicy};
