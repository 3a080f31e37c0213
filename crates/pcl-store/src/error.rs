use std::path::PathBuf;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O failure from the underlying file system.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The ledger file exists but cannot be understood. The file is left
    /// untouched; it is never reset to empty.
    #[error("corrupt ledger file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The ledger file was written by a newer version of the tool.
    #[error("unsupported ledger document version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Another process wrote the ledger between our load and our save.
    #[error(
        "ledger changed underfoot (loaded generation {loaded}, found {found}); re-run the command"
    )]
    ConcurrentModification { loaded: u64, found: u64 },
}
