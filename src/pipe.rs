//! Creation and usage of unidirectional unnamed pipes.
//!
//! A pipe is a pair of connected endpoints: whatever is written to the [`PipeWriter`] comes out of
//! the [`PipeReader`] in the same order. Both ends are created non-inheritable, so a child process
//! only gets a pipe end if it is explicitly handed one.
//!
//! On top of the raw byte stream, the reader offers three read modes (see [`ReadMode`]): a single
//! read of up to *n* bytes, a line read with or without its terminator, and a read of everything
//! that is currently available. How those behave when the pipe has no data depends on the
//! nonblocking mode of the reading end, which can be queried and changed at any time.

mod handle;
mod options;
mod reader;
mod writer;

pub use {options::*, reader::*, writer::*};

pub(crate) use handle::*;

use crate::Result;

/// Creates a new pipe with the default creation settings and returns its reading and writing ends.
///
/// Equivalent to `PipeOptions::new().create()`; use [`PipeOptions`] to configure the pipe.
///
/// # Example
/// ```
#[doc = doctest_file::include_doctest!("demos/pipe/main.rs")]
/// ```
pub fn pipe() -> Result<(PipeReader, PipeWriter)> { PipeOptions::new().create() }

/// How much a single [`PipeReader::read_with`] call reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// One read call of up to the given number of bytes. May return fewer, including none at
    /// end-of-stream.
    Exact(usize),
    /// Reads up to and including the next `\n`, or to end-of-stream. With `chop`, the terminator
    /// is left out of the result.
    Line {
        /// Whether to strip the trailing newline.
        chop: bool,
    },
    /// Reads chunk after chunk until a read comes back short.
    All,
}
impl ReadMode {
    /// Parses a mode selector string: `l` for a chopped line, `L` for a line with its terminator,
    /// `a` for everything. Only the first character counts, so `line` and `all` work too, and a
    /// leading `*` is skipped.
    pub fn from_selector(selector: &str) -> Option<Self> {
        let selector = selector.strip_prefix('*').unwrap_or(selector);
        match selector.bytes().next()? {
            b'l' => Some(Self::Line { chop: true }),
            b'L' => Some(Self::Line { chop: false }),
            b'a' => Some(Self::All),
            _ => None,
        }
    }
}
