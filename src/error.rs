//! Unified error types for pagelog.
//!
//! This module provides a single error type covering every way a page
//! write can fail. No error here is recovered internally; all of them
//! surface to the caller of `write`/`end`, because a logger that
//! silently drops output is worse than one that reports the failure.

use std::path::PathBuf;
use thiserror::Error;

/// All pagelog errors.
///
/// This is the canonical error type for all page writer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// `write` was called before `setup` bound an association.
    ///
    /// This is a programmer error, not a runtime condition: the
    /// association must be bound exactly once before the first write.
    #[error("writer not set up: call setup() before write()")]
    NotSetUp,

    /// `write` was called after `end` finalized the writer.
    ///
    /// The writer's lifecycle is terminal after `end`; a new unit of
    /// work gets a new writer with a fresh identity.
    #[error("writer already ended")]
    Ended,

    /// A page file with the computed name already exists.
    ///
    /// Page names are derived from a per-writer unique identity, so a
    /// collision indicates an invariant violation (duplicated identity
    /// or leftover state), never a recoverable condition. The existing
    /// file is left untouched.
    #[error("page file already exists: {path}")]
    PageCollision {
        /// Path of the colliding page file
        path: PathBuf,
    },

    /// I/O error from page create/write/flush/close.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pagelog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a lifecycle misuse (setup/end ordering).
    pub fn is_misuse(&self) -> bool {
        matches!(self, Error::NotSetUp | Error::Ended)
    }

    /// Check if this is a naming collision.
    pub fn is_collision(&self) -> bool {
        matches!(self, Error::PageCollision { .. })
    }

    /// Check if this error came from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::PageCollision { .. })
    }
}
