//! The error type shared by every operation in the crate.
//!
//! OS failures always keep the original [`io::Error`], so the raw OS error code survives all the
//! way to the caller and can be used to tell retryable conditions (would-block) apart from fatal
//! ones.

use std::{borrow::Cow, io};

impmod! {c_wrappers, is_would_block as is_would_block_impl}

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by pipe and link operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An OS-level call failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being done when the call failed.
        context: Cow<'static, str>,
        /// The OS error, with its raw code intact.
        #[source]
        source: io::Error,
    },
    /// A read failed after some bytes had already been accumulated. The bytes are handed back
    /// instead of being dropped.
    #[error("read failed after {} bytes: {source}", data.len())]
    PartialRead {
        /// Bytes read before the failure.
        data: Vec<u8>,
        /// The OS error that ended the read.
        #[source]
        source: io::Error,
    },
    /// A write call succeeded but transferred fewer bytes than the part it was given.
    #[error("short write on part #{part}: {written} of {len} bytes written")]
    ShortWrite {
        /// Zero-based index of the part that could not be written fully.
        part: usize,
        /// How many bytes of that part did get written.
        written: usize,
        /// The length of that part.
        len: usize,
    },
    /// An argument passed through the [method table](crate::host) was malformed. Raised before
    /// any system call is made.
    #[error("bad argument #{position} ({reason})")]
    InvalidArgument {
        /// One-based position of the argument, counting the handle itself as #1.
        position: usize,
        /// Human-readable explanation.
        reason: Cow<'static, str>,
    },
}
impl Error {
    #[inline]
    pub(crate) fn io(context: impl Into<Cow<'static, str>>, source: io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
    #[inline]
    pub(crate) fn argument(position: usize, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument { position, reason: reason.into() }
    }
    /// Builds the error returned by reads that fail, attaching whatever was accumulated.
    pub(crate) fn read_failed(data: Vec<u8>, source: io::Error) -> Self {
        if data.is_empty() {
            Self::io("read failed", source)
        } else {
            Self::PartialRead { data, source }
        }
    }

    /// Returns the underlying OS error, if there is one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } | Self::PartialRead { source, .. } => Some(source),
            Self::ShortWrite { .. } | Self::InvalidArgument { .. } => None,
        }
    }
    /// Returns the raw OS error code (`errno` on Unix, `GetLastError()` on Windows), if the error
    /// came from the OS.
    #[inline]
    pub fn os_code(&self) -> Option<i32> { self.io_error().and_then(io::Error::raw_os_error) }
    /// Whether the error is the OS reporting that a nonblocking operation could not complete
    /// immediately.
    #[inline]
    pub fn is_would_block(&self) -> bool { self.io_error().map_or(false, is_would_block) }
    /// Bytes that were read before the failure, if any.
    pub fn partial_data(&self) -> Option<&[u8]> {
        match self {
            Self::PartialRead { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Whether `e` signals that a nonblocking call would have blocked, as opposed to a real failure.
///
/// Besides [`WouldBlock`](io::ErrorKind::WouldBlock), this also recognizes platform codes that
/// the standard library does not map to that kind, such as `ERROR_NO_DATA` from a Windows pipe in
/// `PIPE_NOWAIT` mode.
#[inline]
pub fn is_would_block(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock || is_would_block_impl(e)
}
