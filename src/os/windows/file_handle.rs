use super::{c_wrappers, winprelude::*};
use crate::{Descriptor, OrErrno};
use std::{
    fmt::{self, Debug, Formatter},
    io, ptr,
};
use windows_sys::Win32::{
    Storage::FileSystem::{ReadFile, WriteFile},
    System::Pipes::PIPE_NOWAIT,
};

/// An owned handle of one pipe end.
#[repr(transparent)]
pub struct FileHandle(pub(super) OwnedHandle);
impl Descriptor for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut bytes_read: u32 = 0;
        let rslt = unsafe {
            ReadFile(
                self.0.as_int_handle(),
                buf.as_mut_ptr().cast(),
                len,
                &mut bytes_read,
                ptr::null_mut(),
            )
        }
        .true_or_errno(|| bytes_read as usize);
        c_wrappers::downgrade_eof(rslt)
    }
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut bytes_written: u32 = 0;
        unsafe {
            WriteFile(
                self.0.as_int_handle(),
                buf.as_ptr().cast(),
                len,
                &mut bytes_written,
                ptr::null_mut(),
            )
        }
        .true_or_errno(|| bytes_written as usize)
    }
    fn nonblocking(&self) -> io::Result<Option<bool>> {
        if !c_wrappers::is_pipe(self.0.as_handle()) {
            return Ok(None);
        }
        let mode = c_wrappers::get_np_handle_mode(self.0.as_handle())?;
        Ok(Some(mode & PIPE_NOWAIT != 0))
    }
    fn set_nonblocking(&mut self, nonblocking: bool) -> io::Result<()> {
        let handle = self.0.as_handle();
        if !c_wrappers::is_pipe(handle) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "nonblocking mode is only available on pipe handles",
            ));
        }
        // Keep the read mode bits as they are.
        let mode = c_wrappers::get_np_handle_mode(handle)?;
        let mode = if nonblocking { mode | PIPE_NOWAIT } else { mode & !PIPE_NOWAIT };
        c_wrappers::set_np_handle_mode(handle, mode)
    }
    #[inline]
    fn close(self) -> io::Result<()> { c_wrappers::close(self.0) }
}

impl AsHandle for FileHandle {
    #[inline]
    fn as_handle(&self) -> BorrowedHandle<'_> { self.0.as_handle() }
}
impl From<FileHandle> for OwnedHandle {
    #[inline]
    fn from(x: FileHandle) -> Self { x.0 }
}
impl From<OwnedHandle> for FileHandle {
    #[inline]
    fn from(handle: OwnedHandle) -> Self { Self(handle) }
}
impl Debug for FileHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FileHandle").field(&self.0.as_raw_handle()).finish()
    }
}
