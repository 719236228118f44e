//! Page files and the identity that names them.
//!
//! A page is one rotated log segment: an append-only UTF-8 text file
//! holding timestamp-prefixed lines. Pages are named
//! `{identity}_{sequence}.log`, with the sequence starting at 1 and
//! strictly increasing within one identity, so the order of a writer's
//! output is recoverable from the filesystem alone.

use crate::error::{Error, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File extension for page files.
pub const PAGE_EXTENSION: &str = "log";

/// Unique token identifying one writer's page series.
///
/// Generated once per writer lifetime and used as the filename prefix
/// for every page that writer produces. Uniqueness of page filenames
/// across concurrent and prior writer instances rests entirely on this
/// token, not on directory partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogIdentity(Uuid);

impl LogIdentity {
    /// Generate a fresh identity.
    pub fn new() -> Self {
        LogIdentity(Uuid::new_v4())
    }
}

impl Default for LogIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the path of page `seq` for `identity` under `pages_dir`.
pub(crate) fn page_path(pages_dir: &Path, identity: LogIdentity, seq: u32) -> PathBuf {
    pages_dir.join(format!("{}_{}.{}", identity, seq, PAGE_EXTENSION))
}

/// An open page accepting appends.
///
/// Owns the file handle from creation until [`OpenPage::finish`], which
/// flushes, syncs, and releases it. The byte counter tracks the UTF-8
/// length of every appended line excluding the trailing terminator;
/// rotation decisions compare this counter against the page-size
/// threshold.
#[derive(Debug)]
pub(crate) struct OpenPage {
    seq: u32,
    path: PathBuf,
    writer: BufWriter<File>,
    byte_count: u64,
}

impl OpenPage {
    /// Create page `seq` for `identity` under `pages_dir`.
    ///
    /// The file is created exclusively: if a file of the computed name
    /// already exists the unique-identity invariant has been violated
    /// and [`Error::PageCollision`] is returned without touching the
    /// existing file.
    pub fn create(pages_dir: &Path, identity: LogIdentity, seq: u32) -> Result<Self> {
        let path = page_path(pages_dir, identity, seq);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    Error::PageCollision { path: path.clone() }
                } else {
                    Error::Io(e)
                }
            })?;
        tracing::debug!(page = %path.display(), seq, "opened page");
        Ok(OpenPage {
            seq,
            path,
            writer: BufWriter::new(file),
            byte_count: 0,
        })
    }

    /// Append one formatted line plus a `\n` terminator.
    ///
    /// Only the line's own UTF-8 length counts toward the byte counter;
    /// the terminator does not.
    pub fn append_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.byte_count += line.len() as u64;
        Ok(())
    }

    /// Bytes of line content written since this page was opened.
    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    /// Sequence number of this page within its identity.
    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// Flush, sync, and close the page, returning its path.
    ///
    /// After this returns the file is durable and the handle released;
    /// ownership of the file passes to whoever receives the path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        tracing::debug!(
            page = %self.path.display(),
            seq = self.seq,
            bytes = self.byte_count,
            "closed page"
        );
        Ok(self.path)
    }
}
