use super::{PipeReader, PipeWriter};
use crate::{Error, Result};
use std::num::NonZeroUsize;

impmod! {unnamed_pipe, pipe as pipe_impl}

/// The chunk size used by [`ReadMode::All`](super::ReadMode::All) unless configured otherwise.
pub const DEFAULT_READ_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(8 * 1024) {
    Some(n) => n,
    None => panic!("chunk size must be nonzero"),
};

/// Builder used to create pipes while supplying additional options.
///
/// You can use this instead of the simple [`pipe` function](super::pipe) to configure the pipe.
/// Regardless of the options, both ends are always created non-inheritable.
#[non_exhaustive]
#[derive(Copy, Clone, Debug)]
pub struct PipeOptions {
    /// Whether both ends start out in nonblocking mode.
    ///
    /// The default value is `false`. Setting this is equivalent to calling
    /// [`set_nonblocking(true)`](PipeReader::set_nonblocking) on both ends right after creation.
    pub nonblocking: bool,
    /// A hint on the buffer size for the pipe. Only has an effect on Windows, where it is passed to
    /// `CreatePipe`; there is no way to check that the system actually uses this exact size. Set to
    /// `None` to rely entirely on the system's default buffer size.
    pub buffer_size_hint: Option<NonZeroUsize>,
    /// The size of the chunks in which the reading end's [`ReadMode::All`](super::ReadMode::All)
    /// accumulates data. Defaults to [`DEFAULT_READ_CHUNK_SIZE`].
    pub read_chunk_size: NonZeroUsize,
}
impl PipeOptions {
    /// Starts with the default parameters for the pipe. Identical to `Default::default()`.
    pub const fn new() -> Self {
        Self {
            nonblocking: false,
            buffer_size_hint: None,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
    /// Specifies whether both ends start out in nonblocking mode.
    ///
    /// See the [associated field](#structfield.nonblocking) for more.
    #[must_use = "this is not an in-place operation"]
    pub fn nonblocking(mut self, nonblocking: bool) -> Self {
        self.nonblocking = nonblocking;
        self
    }
    /// Specifies the hint on the buffer size for the pipe.
    ///
    /// See the [associated field](#structfield.buffer_size_hint) for more.
    #[must_use = "this is not an in-place operation"]
    pub fn buffer_size_hint(mut self, buffer_size_hint: Option<NonZeroUsize>) -> Self {
        self.buffer_size_hint = buffer_size_hint;
        self
    }
    /// Specifies the chunk size of read-all operations on the reading end.
    ///
    /// See the [associated field](#structfield.read_chunk_size) for more.
    #[must_use = "this is not an in-place operation"]
    pub fn read_chunk_size(mut self, read_chunk_size: NonZeroUsize) -> Self {
        self.read_chunk_size = read_chunk_size;
        self
    }

    /// Creates the pipe and returns its reading and writing ends.
    ///
    /// Either both ends are returned or neither is: if configuring the freshly created pair fails,
    /// both descriptors are closed before the error is returned.
    ///
    /// # Errors
    /// [`Error::Io`] with the OS error code if the pipe cannot be created or configured.
    pub fn create(&self) -> Result<(PipeReader, PipeWriter)> {
        let (r, w) = pipe_impl(self).map_err(|e| Error::io("pipe creation failed", e))?;
        let mut reader = PipeReader::from_descriptor(r).with_chunk_size(self.read_chunk_size);
        let mut writer = PipeWriter::from_descriptor(w);
        if self.nonblocking {
            reader.set_nonblocking(true)?;
            writer.set_nonblocking(true)?;
        }
        log::debug!("created pipe: {reader:?} <- {writer:?}");
        Ok((reader, writer))
    }
}
impl Default for PipeOptions {
    #[inline]
    fn default() -> Self { Self::new() }
}
