//! Convenient imports for pagelog.
//!
//! Re-exports the types most hosts need:
//!
//! ```ignore
//! use pagelog::prelude::*;
//!
//! let mut log = PageWriter::new(pages_dir, queue)?;
//! log.setup(timeline_id, record_id, false);
//! log.write("hello")?;
//! log.end()?;
//! ```

// The writer
pub use crate::writer::{PageWriter, SharedPageWriter, PAGE_SIZE};

// Error handling
pub use crate::error::{Error, Result};

// Upload collaborator interface
pub use crate::upload::{Association, FileUpload, UploadQueue};

// Page naming
pub use crate::page::LogIdentity;

// Trace configuration
pub use crate::settings::{TraceLevel, TraceSettings};
