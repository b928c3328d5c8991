//! # Storage Error Types
//!
//! Error types for cart storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sled::Error / serde_json::Error                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← typed, carried out of the storage layer    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartSession logs warn! and SWALLOWS it ← storage failure is never     │
//! │                                           surfaced to the UI; the      │
//! │                                           cart continues in memory     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Cart storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying key-value store failed (open, read, write, flush).
    ///
    /// ## When This Occurs
    /// - Store directory is missing or unwritable
    /// - Disk full / quota exceeded
    /// - Another process holds the store lock
    #[error("Storage failure: {0}")]
    Storage(#[from] sled::Error),

    /// The stored payload is not valid JSON for the persisted cart shape.
    ///
    /// ## When This Occurs
    /// - A foreign writer corrupted the key
    /// - Truncated write from a crashed process
    #[error("Payload serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
