use super::{End, Handle};
use crate::{Descriptor, Error, OsDescriptor, Result};
use std::{
    fmt::{self, Debug, Formatter},
    io::{self, Write},
};

/// The writing end of a pipe, created by [`pipe()`](super::pipe) together with the
/// [reading end](super::PipeReader).
///
/// The descriptor is closed by [`close`](Self::close) or when the writer is dropped. Dropping the
/// last writer is what makes the reading end see end-of-stream.
pub struct PipeWriter<D = OsDescriptor> {
    handle: Handle<D>,
}
impl<D: Descriptor> PipeWriter<D> {
    /// Wraps a descriptor that is already the writing end of a pipe. The cached nonblocking flag
    /// starts out as `false`.
    pub fn from_descriptor(desc: D) -> Self { Self { handle: Handle::new(desc, End::Write) } }

    /// Writes each part with a single write call, in order, and returns `self` for chaining.
    ///
    /// Partial writes are not retried: the first part that the OS does not take in full stops the
    /// sequence, and the parts after it are not attempted.
    ///
    /// # Errors
    /// - [`Error::Io`] with the OS error code if a write call fails.
    /// - [`Error::ShortWrite`] if a write call succeeds but takes only part of its input.
    pub fn write_parts<P: AsRef<[u8]>>(
        &mut self,
        parts: impl IntoIterator<Item = P>,
    ) -> Result<&mut Self> {
        let desc = self.handle.desc().map_err(|e| Error::io("write failed", e))?;
        for (part, buf) in parts.into_iter().enumerate() {
            let buf = buf.as_ref();
            let written = desc.write(buf).map_err(|e| Error::io("write failed", e))?;
            if written != buf.len() {
                return Err(Error::ShortWrite { part, written, len: buf.len() });
            }
            log::trace!("wrote part #{part} ({written} bytes)");
        }
        Ok(self)
    }

    /// Closes the writing end, reporting the outcome of the close call. Closing an already closed
    /// end does nothing and succeeds.
    #[inline]
    pub fn close(&mut self) -> Result<()> { self.handle.close() }
    /// Whether [`close`](Self::close) has been called.
    #[inline]
    pub fn is_closed(&self) -> bool { self.handle.is_closed() }
    /// Queries the OS for the nonblocking mode, updating the cached flag.
    #[inline]
    pub fn is_nonblocking(&mut self) -> Result<bool> { self.handle.is_nonblocking() }
    /// Enables or disables nonblocking mode and returns the resulting mode. Does not issue a mode
    /// change if the OS already reports the desired mode. On failure, the cached flag is left
    /// untouched.
    #[inline]
    pub fn set_nonblocking(&mut self, nonblocking: bool) -> Result<bool> {
        self.handle.set_nonblocking(nonblocking)
    }
}

impl<D: Descriptor> Write for PipeWriter<D> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.handle.desc()?.write(buf) }
    /// Pipes have no userspace buffer, so there is nothing to flush.
    #[inline]
    fn flush(&mut self) -> io::Result<()> { self.handle.desc().map(|_| ()) }
}

impl<D: Debug> Debug for PipeWriter<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeWriter").field("handle", &self.handle).finish()
    }
}
