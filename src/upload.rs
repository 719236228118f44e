//! Upload collaborator interface.
//!
//! The page writer does not ship files anywhere itself. When a page is
//! finalized it hands the file off to an [`UploadQueue`] implementation,
//! which owns queuing, transport, retries, and eventual deletion. From
//! the writer's point of view the hand-off is fire-and-forget:
//! [`UploadQueue::queue_file_upload`] must return without waiting on the
//! remote transfer.

use crate::page::LogIdentity;
use std::path::PathBuf;
use uuid::Uuid;

/// Category string attached to every completed-page notification.
pub const LOG_CATEGORY: &str = "DistributedTask.Core.Log";

/// Kind string attached to every completed-page notification.
pub const LOG_KIND: &str = "CustomToolLog";

/// The (timeline, record) pair a writer's output is attributed to.
///
/// Bound once via `setup` and passed through unchanged on every
/// completion notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    /// Timeline the owning task belongs to
    pub timeline_id: Uuid,
    /// Record within the timeline
    pub record_id: Uuid,
}

impl Association {
    /// Create an association from its two identifiers.
    pub fn new(timeline_id: Uuid, record_id: Uuid) -> Self {
        Association {
            timeline_id,
            record_id,
        }
    }
}

/// A completed-page notification.
///
/// Emitted exactly once per page, only after the page file has been
/// flushed and its handle released. Once emitted, ownership of the file
/// transfers to the upload collaborator; the writer never touches the
/// file again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Association the page belongs to
    pub association: Association,
    /// Identity of the writer that produced the page
    pub identity: LogIdentity,
    /// Fixed category string ([`LOG_CATEGORY`])
    pub category: String,
    /// Fixed kind string ([`LOG_KIND`])
    pub kind: String,
    /// Path of the completed page file
    pub path: PathBuf,
    /// True for log-type artifacts (always true for pages)
    pub is_log: bool,
}

/// Consumer of completed page files.
///
/// Implementations own their own queue and threading so that
/// notification returns immediately, not after the remote upload
/// completes. Network retry policy lives behind this trait, never in
/// the writer.
pub trait UploadQueue: Send + Sync {
    /// Queue a completed page file for upload.
    fn queue_file_upload(&self, upload: FileUpload);
}
