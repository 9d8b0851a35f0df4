//! Error types for chunked file processing.
//!
//! Only fatal conditions surface here: I/O failures and invalid UTF-8 in the
//! source. Text-level anomalies (malformed directives, unparseable numbers)
//! are absorbed inside the pipeline by leaving the text unchanged.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal errors crossing the coordinator boundary, with enough context to
/// point at the failing file and position.
#[derive(Debug)]
pub enum ProcessError {
    /// An I/O operation failed.
    Io {
        /// What the coordinator was doing, e.g. "open", "read", "write".
        op: &'static str,
        path: PathBuf,
        /// Byte offset into the input, where one applies.
        offset: Option<u64>,
        source: io::Error,
    },
    /// The input is not valid UTF-8. Incomplete sequences at a window edge
    /// are handled by trimming; this fires only for genuinely broken bytes.
    InvalidUtf8 { path: PathBuf, offset: u64 },
}

impl ProcessError {
    pub(crate) fn io<'a>(
        op: &'static str,
        path: &'a std::path::Path,
        offset: Option<u64>,
    ) -> impl FnOnce(io::Error) -> ProcessError + 'a {
        move |source| ProcessError::Io {
            op,
            path: path.to_path_buf(),
            offset,
            source,
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Io {
                op,
                path,
                offset: Some(offset),
                source,
            } => write!(
                f,
                "failed to {} {} at byte {}: {}",
                op,
                path.display(),
                offset,
                source
            ),
            ProcessError::Io {
                op,
                path,
                offset: None,
                source,
            } => write!(f, "failed to {} {}: {}", op, path.display(), source),
            ProcessError::InvalidUtf8 { path, offset } => {
                write!(f, "{} is not valid UTF-8 at byte {}", path.display(), offset)
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Io { source, .. } => Some(source),
            ProcessError::InvalidUtf8 { .. } => None,
        }
    }
}
