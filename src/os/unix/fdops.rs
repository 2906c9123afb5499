use super::{c_wrappers, unixprelude::*};
use crate::Descriptor;
use std::{
    fmt::{self, Debug, Formatter},
    io,
};

/// An owned file descriptor of one pipe end.
#[repr(transparent)]
pub struct FdOps(pub(super) OwnedFd);
impl Descriptor for FdOps {
    #[allow(clippy::cast_sign_loss)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let length_to_read = buf.len();

        let (success, bytes_read) = unsafe {
            let size_or_err =
                libc::read(self.0.as_raw_fd(), buf.as_mut_ptr().cast(), length_to_read);
            (size_or_err >= 0, size_or_err as usize)
        };
        ok_or_errno!(success => bytes_read)
    }
    #[allow(clippy::cast_sign_loss)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let length_to_write = buf.len();

        let (success, bytes_written) = unsafe {
            let size_or_err =
                libc::write(self.0.as_raw_fd(), buf.as_ptr().cast(), length_to_write);
            (size_or_err >= 0, size_or_err as usize)
        };
        ok_or_errno!(success => bytes_written)
    }
    #[inline]
    fn nonblocking(&self) -> io::Result<Option<bool>> {
        c_wrappers::get_nonblocking(self.0.as_fd()).map(Some)
    }
    #[inline]
    fn set_nonblocking(&mut self, nonblocking: bool) -> io::Result<()> {
        c_wrappers::set_nonblocking(self.0.as_fd(), nonblocking)
    }
    #[inline]
    fn wait_readable(&mut self) -> io::Result<()> { c_wrappers::poll_readable(self.0.as_fd()) }
    #[inline]
    fn close(self) -> io::Result<()> { c_wrappers::close(self.0) }
}

impl AsFd for FdOps {
    #[inline]
    fn as_fd(&self) -> BorrowedFd<'_> { self.0.as_fd() }
}
impl From<FdOps> for OwnedFd {
    #[inline]
    fn from(x: FdOps) -> Self { x.0 }
}
impl From<OwnedFd> for FdOps {
    #[inline]
    fn from(fd: OwnedFd) -> Self { Self(fd) }
}
impl Debug for FdOps {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FdOps").field(&self.0.as_raw_fd()).finish()
    }
}
