//! # Pagelog
//!
//! Paged log writer with size-based rotation and upload hand-off.
//!
//! Pagelog accumulates free-text log lines produced during one unit of
//! work, persists them to disk in fixed-size segments ("pages"), and
//! hands each completed page to an upload collaborator for delivery to
//! a remote log store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pagelog::prelude::*;
//! use std::sync::Arc;
//!
//! let queue: Arc<dyn UploadQueue> = Arc::new(MyUploadQueue::connect()?);
//! let mut log = PageWriter::new("./diag/pages", queue)?;
//!
//! // Bind the (timeline, record) pair the output belongs to.
//! log.setup(timeline_id, record_id, false);
//!
//! log.write("##[section] Starting tool")?;
//! log.write("tool output line")?;
//!
//! // Flush and hand off the final page.
//! log.end()?;
//! ```
//!
//! ## Guarantees
//!
//! - **Lazy**: no file exists until the first `write`.
//! - **Bounded**: a page rolls over once its byte counter reaches the
//!   8 MiB threshold; a single line is never split across pages.
//! - **Ordered**: pages are named `{identity}_{seq}.log` with a
//!   contiguous sequence from 1, so output order is recoverable from
//!   the filesystem alone.
//! - **Exactly-once hand-off**: each page triggers one completion
//!   notification, only after the file is flushed and closed.
//! - **Loud failures**: filesystem errors surface to the caller; the
//!   writer never silently drops output.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod page;
mod settings;
mod upload;
mod writer;

pub mod prelude;

// Error handling
pub use error::{Error, Result};

// Page naming
pub use page::{LogIdentity, PAGE_EXTENSION};

// Upload collaborator interface
pub use upload::{Association, FileUpload, UploadQueue, LOG_CATEGORY, LOG_KIND};

// Trace configuration
pub use settings::{TraceLevel, TraceSettings, TRACE_ENV_VAR};

// The writer itself
pub use writer::{PageWriter, SharedPageWriter, PAGE_SIZE};
