//! Durable storage for PCL.
//!
//! The ledger is persisted as a single JSON document, loaded whole at the
//! start of a command and saved whole at the end (the collection is
//! personal-scale). Two disciplines keep it safe:
//!
//! - **Atomic replace**: a save writes to a temporary file in the target
//!   directory and renames it into place, so a crash never leaves a
//!   half-written ledger behind.
//! - **Generation check**: every saved document carries a generation
//!   counter. A save verifies that the on-disk generation is still the one
//!   it loaded; if another process wrote in between, the save fails with
//!   [`StoreError::ConcurrentModification`] instead of silently dropping
//!   that process's writes.
//!
//! [`LedgerSession`] ties a backend and a ledger together for the span of
//! one command invocation: open, mutate, commit.

pub mod backend;
pub mod document;
pub mod error;
pub mod json_file;
pub mod session;

pub use backend::{MemoryStore, StorageBackend};
pub use document::{LedgerDocument, DOCUMENT_VERSION};
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use session::LedgerSession;
