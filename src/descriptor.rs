//! The seam between the pipe logic and the operating system.
//!
//! Everything the [reader](crate::PipeReader) and [writer](crate::PipeWriter) need from the OS
//! goes through the [`Descriptor`] trait: a raw read, a raw write, the two halves of the
//! nonblocking mode controller, a readiness wait and the final close. The platform
//! implementation is [`OsDescriptor`]; tests substitute scripted fakes.

use std::{io, thread};

#[cfg(unix)]
pub use crate::os::unix::FdOps as OsDescriptor;
#[cfg(windows)]
pub use crate::os::windows::FileHandle as OsDescriptor;

/// Operations on a single owned OS pipe endpoint.
///
/// Implementations report failures as plain [`io::Error`]s carrying the raw OS code; the pipe
/// types add context and decide which of them are tolerable.
pub trait Descriptor {
    /// Issues one read call of up to `buf.len()` bytes. `Ok(0)` means end-of-stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    /// Issues one write call and returns how many bytes the OS accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
    /// Queries the OS-level nonblocking mode.
    ///
    /// `Ok(None)` means the object has no such mode at all (a non-pipe handle on Windows), which
    /// callers treat as blocking.
    fn nonblocking(&self) -> io::Result<Option<bool>>;
    /// Unconditionally changes the OS-level nonblocking mode.
    fn set_nonblocking(&mut self, nonblocking: bool) -> io::Result<()>;
    /// Waits until a read is likely to make progress. Only called after a read in nonblocking
    /// mode has reported would-block.
    ///
    /// The default yields the thread's time slice and returns.
    fn wait_readable(&mut self) -> io::Result<()> {
        thread::yield_now();
        Ok(())
    }
    /// Closes the descriptor and reports the outcome of the close call.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}
