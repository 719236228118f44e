//! The paged log writer.
//!
//! `PageWriter` accumulates free-text log lines for one unit of work,
//! persists them in fixed-size page files, and notifies an upload
//! collaborator as each page completes:
//!
//! - Page #1 is created lazily on the first `write`, never earlier.
//! - Each line is prefixed with an RFC 3339 UTC timestamp.
//! - Once the page's byte counter reaches the size threshold, the page
//!   is closed, its completion notification fires, and the next page
//!   opens with the sequence number incremented. The line that crosses
//!   the threshold stays whole in the page it crossed on.
//! - `end` finalizes the last (possibly partial) page, or does nothing
//!   if no write ever happened.
//!
//! Filesystem errors are never swallowed; they propagate to the caller
//! of `write`/`end`, and there is no internal retry.

use crate::error::{Error, Result};
use crate::page::{LogIdentity, OpenPage};
use crate::upload::{Association, FileUpload, UploadQueue, LOG_CATEGORY, LOG_KIND};
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default page-size threshold: 8 MiB.
///
/// Rotation triggers once a page's byte counter reaches or exceeds this
/// value, after the crossing line has been written. It is a roll-over
/// boundary, not a hard cap on file size.
pub const PAGE_SIZE: u64 = 8 * 1024 * 1024;

/// Lifecycle of the page series.
///
/// Transitions happen only inside the rotation sequence: `Unopened`
/// becomes `Open` on the first write, `Open` stays `Open` across
/// rotations, and `end` moves any state to `Closed`. `Closed` is
/// terminal.
#[derive(Debug)]
enum PageState {
    /// No write has happened yet; no file exists.
    Unopened,
    /// One page is accepting writes.
    Open(OpenPage),
    /// `end` ran; no further writes are accepted.
    Closed,
}

/// Format one log line: RFC 3339 UTC timestamp, a space, the message.
///
/// Microsecond precision with a `Z` suffix keeps the prefix
/// fixed-width and round-trippable.
fn format_line(now: DateTime<Utc>, message: &str) -> String {
    format!(
        "{} {}",
        now.to_rfc3339_opts(SecondsFormat::Micros, true),
        message
    )
}

/// Paged log writer for one logical unit of work.
///
/// # Example
///
/// ```ignore
/// use pagelog::prelude::*;
/// use std::sync::Arc;
///
/// let queue: Arc<dyn UploadQueue> = Arc::new(MyQueue::connect()?);
/// let mut log = PageWriter::new("./diag/pages", queue)?;
/// log.setup(timeline_id, record_id, false);
///
/// log.write("tool started")?;
/// log.write("tool finished")?;
/// log.end()?;
/// ```
///
/// # Concurrency
///
/// `write` and `end` take `&mut self`, so one `PageWriter` has exactly
/// one logical writer by construction. Callers that need to share a
/// writer across threads use [`SharedPageWriter`], which serializes the
/// whole write body (open-check through rotation) under one lock.
pub struct PageWriter {
    identity: LogIdentity,
    pages_dir: PathBuf,
    queue: Arc<dyn UploadQueue>,
    page_size: u64,
    association: Option<Association>,
    debug_logging: bool,
    state: PageState,
    /// Sequence number of the most recently opened page; 0 before any.
    page_count: u32,
}

impl PageWriter {
    /// Create a writer that stores pages under `pages_dir`.
    ///
    /// Generates a fresh [`LogIdentity`] and creates the pages
    /// directory if it does not exist. The upload queue is an explicit
    /// dependency; completed pages are handed to it and to nothing
    /// else.
    pub fn new(pages_dir: impl AsRef<Path>, queue: Arc<dyn UploadQueue>) -> Result<Self> {
        let pages_dir = pages_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&pages_dir)?;
        let identity = LogIdentity::new();
        tracing::debug!(%identity, dir = %pages_dir.display(), "page writer created");
        Ok(PageWriter {
            identity,
            pages_dir,
            queue,
            page_size: PAGE_SIZE,
            association: None,
            debug_logging: false,
            state: PageState::Unopened,
            page_count: 0,
        })
    }

    /// Override the page-size threshold (default [`PAGE_SIZE`]).
    ///
    /// Intended for tests and special deployments; the rotation
    /// algorithm is unchanged. Must be called before the first write.
    pub fn with_page_size(mut self, bytes: u64) -> Self {
        self.page_size = bytes;
        self
    }

    /// Bind the association carried on every completion notification.
    ///
    /// `debug_logging` records whether this writer's output should also
    /// be mirrored to a secondary debug destination by the collaborator;
    /// the flag is stored and exposed, never consumed by rotation.
    /// Must be called exactly once before the first `write`.
    pub fn setup(&mut self, timeline_id: uuid::Uuid, record_id: uuid::Uuid, debug_logging: bool) {
        self.association = Some(Association::new(timeline_id, record_id));
        self.debug_logging = debug_logging;
    }

    /// Append one log line.
    ///
    /// Lazily creates page #1 on the first call. The formatted line's
    /// UTF-8 length (terminator excluded) is added to the page's byte
    /// counter; if the counter then reaches the threshold, the page is
    /// rotated after this line, so the crossing line is always fully
    /// contained in the page it crossed on.
    ///
    /// # Errors
    ///
    /// [`Error::NotSetUp`] before `setup`, [`Error::Ended`] after `end`,
    /// and any filesystem error from page creation or the append.
    pub fn write(&mut self, message: &str) -> Result<()> {
        let association = self.association.ok_or(Error::NotSetUp)?;

        match self.state {
            PageState::Closed => return Err(Error::Ended),
            PageState::Unopened => {
                // Lazy creation on first write.
                self.page_count = 1;
                let page = OpenPage::create(&self.pages_dir, self.identity, self.page_count)?;
                self.state = PageState::Open(page);
            }
            PageState::Open(_) => {}
        }

        let line = format_line(Utc::now(), message);
        let PageState::Open(page) = &mut self.state else {
            unreachable!("page opened above");
        };
        page.append_line(&line)?;

        if page.byte_count() >= self.page_size {
            self.rotate(association)?;
        }
        Ok(())
    }

    /// Finalize the writer.
    ///
    /// If a page is open: flush it to durable storage, release the
    /// handle, and emit exactly one completion notification. If no page
    /// was ever opened, nothing is written and nothing is notified.
    /// Idempotent; later calls are no-ops. Writes after `end` fail with
    /// [`Error::Ended`].
    pub fn end(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, PageState::Closed) {
            PageState::Open(page) => {
                let association = self.association.ok_or(Error::NotSetUp)?;
                self.complete_page(page, association)
            }
            PageState::Unopened | PageState::Closed => Ok(()),
        }
    }

    /// Identity used as the filename prefix for this writer's pages.
    pub fn identity(&self) -> LogIdentity {
        self.identity
    }

    /// Whether `setup` requested courtesy debug mirroring.
    pub fn debug_logging_enabled(&self) -> bool {
        self.debug_logging
    }

    /// Byte counter of the currently open page, if one is open.
    ///
    /// Counts formatted line bytes excluding terminators; resets to 0
    /// whenever a new page opens.
    pub fn current_page_bytes(&self) -> Option<u64> {
        match &self.state {
            PageState::Open(page) => Some(page.byte_count()),
            _ => None,
        }
    }

    /// Close the current page, notify, and open the next one.
    fn rotate(&mut self, association: Association) -> Result<()> {
        let PageState::Open(page) = std::mem::replace(&mut self.state, PageState::Closed) else {
            unreachable!("rotate called with a page open");
        };
        self.complete_page(page, association)?;

        self.page_count += 1;
        let next = OpenPage::create(&self.pages_dir, self.identity, self.page_count)?;
        self.state = PageState::Open(next);
        Ok(())
    }

    /// Flush and close `page`, then fire its completion notification.
    ///
    /// The notification goes out only after the file is durable and the
    /// handle released; from that point the file belongs to the queue.
    fn complete_page(&self, page: OpenPage, association: Association) -> Result<()> {
        let seq = page.seq();
        let path = page.finish()?;
        tracing::trace!(identity = %self.identity, seq, "page queued for upload");
        self.queue.queue_file_upload(FileUpload {
            association,
            identity: self.identity,
            category: LOG_CATEGORY.to_string(),
            kind: LOG_KIND.to_string(),
            path,
            is_log: true,
        });
        Ok(())
    }
}

/// Thread-safe handle over a [`PageWriter`].
///
/// Clones share one underlying writer; every `write` runs under a
/// single lock acquisition covering the lazy-open check, the append,
/// the counter update, and any triggered rotation, so page boundaries
/// cannot interleave between threads.
#[derive(Clone)]
pub struct SharedPageWriter {
    inner: Arc<Mutex<PageWriter>>,
}

impl SharedPageWriter {
    /// Wrap a writer for shared use.
    pub fn new(writer: PageWriter) -> Self {
        SharedPageWriter {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// See [`PageWriter::setup`].
    pub fn setup(&self, timeline_id: uuid::Uuid, record_id: uuid::Uuid, debug_logging: bool) {
        self.inner.lock().setup(timeline_id, record_id, debug_logging);
    }

    /// See [`PageWriter::write`].
    pub fn write(&self, message: &str) -> Result<()> {
        self.inner.lock().write(message)
    }

    /// See [`PageWriter::end`].
    pub fn end(&self) -> Result<()> {
        self.inner.lock().end()
    }

    /// See [`PageWriter::identity`].
    pub fn identity(&self) -> LogIdentity {
        self.inner.lock().identity()
    }
}
