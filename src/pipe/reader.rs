use super::{End, Handle, ReadMode, DEFAULT_READ_CHUNK_SIZE};
use crate::{error::is_would_block, Descriptor, Error, OsDescriptor, Result};
use std::{
    fmt::{self, Debug, Formatter},
    io::{self, Read},
    num::NonZeroUsize,
};

const READ_FAILED: &str = "read failed";

/// Upper bound on the buffer of a single [`read_up_to`](PipeReader::read_up_to) call. No pipe
/// hands out more than its capacity in one read, and the default Linux maximum is 1 MiB.
pub const MAX_SINGLE_READ: usize = 1024 * 1024;

/// The reading end of a pipe, created by [`pipe()`](super::pipe) together with the
/// [writing end](super::PipeWriter).
///
/// Besides the raw [`Read`] implementation, the reader offers the three buffered read modes of
/// [`ReadMode`]. Their behavior on an empty pipe depends on the nonblocking mode last observed
/// through [`is_nonblocking`](Self::is_nonblocking) or set through
/// [`set_nonblocking`](Self::set_nonblocking):
/// - in blocking mode, the OS simply blocks the calling thread until data arrives;
/// - in nonblocking mode, [`ReadMode::All`] treats "would block" as "nothing more for now" and
///   returns what it has, and [`ReadMode::Line`] waits for the rest of the line to arrive.
///
/// The descriptor is closed by [`close`](Self::close) or when the reader is dropped.
pub struct PipeReader<D = OsDescriptor> {
    handle: Handle<D>,
    chunk_size: NonZeroUsize,
}
impl<D: Descriptor> PipeReader<D> {
    /// Wraps a descriptor that is already the reading end of a pipe. The cached nonblocking flag
    /// starts out as `false`.
    pub fn from_descriptor(desc: D) -> Self {
        Self { handle: Handle::new(desc, End::Read), chunk_size: DEFAULT_READ_CHUNK_SIZE }
    }
    /// Sets the chunk size used by [`read_all`](Self::read_all).
    #[must_use = "this is not an in-place operation"]
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Reads according to `mode`. See the per-mode methods for details.
    pub fn read_with(&mut self, mode: ReadMode) -> Result<Vec<u8>> {
        match mode {
            ReadMode::Exact(len) => self.read_up_to(len),
            ReadMode::Line { chop } => self.read_line(chop),
            ReadMode::All => self.read_all(),
        }
    }

    /// Issues a single read of up to `len` bytes and returns exactly what it produced, which is
    /// empty at end-of-stream. Requests above [`MAX_SINGLE_READ`] read at most that much.
    ///
    /// # Errors
    /// [`Error::Io`] with the OS error code. Would-block is reported like any other error here.
    pub fn read_up_to(&mut self, len: usize) -> Result<Vec<u8>> {
        let desc = self.handle.desc().map_err(|e| Error::io(READ_FAILED, e))?;
        let mut buf = vec![0; len.min(MAX_SINGLE_READ)];
        let bytes_read = desc.read(&mut buf).map_err(|e| Error::io(READ_FAILED, e))?;
        buf.truncate(bytes_read);
        log::trace!("read {bytes_read} of up to {len} bytes");
        Ok(buf)
    }

    /// Reads one line, one byte per read call, stopping after a `\n` or at end-of-stream. With
    /// `chop`, the `\n` is not included in the result.
    ///
    /// In nonblocking mode, running out of data in the middle of a line does not end it: the
    /// reader waits for the descriptor to become readable and carries on.
    ///
    /// # Errors
    /// [`Error::Io`] if the first read fails, [`Error::PartialRead`] (carrying the part of the
    /// line read so far) if a later one does.
    pub fn read_line(&mut self, chop: bool) -> Result<Vec<u8>> {
        let nonblocking = self.handle.cached_nonblocking();
        let desc = self.handle.desc().map_err(|e| Error::io(READ_FAILED, e))?;
        let mut line = Vec::new();
        let mut byte = [0_u8; 1];
        loop {
            match desc.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    let [b] = byte;
                    if b != b'\n' {
                        line.push(b);
                    } else {
                        if !chop {
                            line.push(b);
                        }
                        break;
                    }
                }
                Err(e) if nonblocking && is_would_block(&e) => {
                    if let Err(e) = desc.wait_readable() {
                        return Err(Error::read_failed(line, e));
                    }
                }
                Err(e) => return Err(Error::read_failed(line, e)),
            }
        }
        log::trace!("read line of {} bytes", line.len());
        Ok(line)
    }

    /// Reads chunk after chunk until a read returns less than a full chunk, then returns
    /// everything read.
    ///
    /// In nonblocking mode, a would-block error ends the read successfully with whatever was
    /// accumulated, possibly nothing.
    ///
    /// # Errors
    /// [`Error::Io`] if nothing was read before the failure, [`Error::PartialRead`] with the
    /// accumulated bytes otherwise.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let chunk_size = self.chunk_size.get();
        let nonblocking = self.handle.cached_nonblocking();
        let desc = self.handle.desc().map_err(|e| Error::io(READ_FAILED, e))?;
        let mut acc = Vec::new();
        loop {
            let filled = acc.len();
            acc.resize(filled.saturating_add(chunk_size), 0);
            let (_, chunk) = acc.split_at_mut(filled);
            match desc.read(chunk) {
                Ok(bytes_read) => {
                    let bytes_read = bytes_read.min(chunk_size);
                    acc.truncate(filled.saturating_add(bytes_read));
                    if bytes_read < chunk_size {
                        break;
                    }
                }
                Err(e) => {
                    acc.truncate(filled);
                    if nonblocking && is_would_block(&e) {
                        break;
                    }
                    return Err(Error::read_failed(acc, e));
                }
            }
        }
        log::trace!("read {} bytes in total", acc.len());
        Ok(acc)
    }

    /// Closes the reading end, reporting the outcome of the close call. Closing an already closed
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

/// A single raw read, without any of the would-block tolerance of the buffered modes.
impl<D: Descriptor> Read for PipeReader<D> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> { self.handle.desc()?.read(buf) }
}

impl<D: Debug> Debug for PipeReader<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeReader")
            .field("handle", &self.handle)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}
