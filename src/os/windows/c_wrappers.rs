use super::winprelude::*;
use crate::{OrErrno, RawOsErrorExt};
use std::{io, mem::size_of, ptr};
use windows_sys::Win32::{
    Foundation::{CloseHandle, ERROR_BROKEN_PIPE, ERROR_INVALID_HANDLE, ERROR_NO_DATA},
    Security::SECURITY_ATTRIBUTES,
    Storage::FileSystem::{GetFileType, FILE_TYPE_PIPE},
    System::Pipes::{CreatePipe, GetNamedPipeHandleStateW, SetNamedPipeHandleState},
};

pub(super) fn is_pipe(handle: BorrowedHandle<'_>) -> bool {
    unsafe { GetFileType(handle.as_int_handle()) == FILE_TYPE_PIPE }
}

pub(super) fn get_np_handle_mode(handle: BorrowedHandle<'_>) -> io::Result<u32> {
    let mut mode: u32 = 0;
    unsafe {
        GetNamedPipeHandleStateW(
            handle.as_int_handle(),
            &mut mode,
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            0,
        )
    }
    .true_val_or_errno(())?;
    Ok(mode)
}

pub(super) fn set_np_handle_mode(handle: BorrowedHandle<'_>, mode: u32) -> io::Result<()> {
    unsafe { SetNamedPipeHandleState(handle.as_int_handle(), &mode, ptr::null(), ptr::null()) }
        .true_val_or_errno(())
}

/// Creates an anonymous pipe whose handles are not inherited by child processes.
pub(super) fn create_pipe(size_hint: u32) -> io::Result<(OwnedHandle, OwnedHandle)> {
    #[allow(clippy::cast_possible_truncation)]
    let attributes = SECURITY_ATTRIBUTES {
        nLength: size_of::<SECURITY_ATTRIBUTES>() as u32,
        lpSecurityDescriptor: ptr::null_mut(),
        bInheritHandle: 0,
    };
    let [mut r, mut w] = [INVALID_HANDLE_VALUE; 2];
    unsafe { CreatePipe(&mut r, &mut w, &attributes, size_hint) }.true_val_or_errno(())?;
    // SAFETY: we just created those handles, which means that we own them
    Ok(unsafe {
        (
            OwnedHandle::from_raw_handle(r as RawHandle),
            OwnedHandle::from_raw_handle(w as RawHandle),
        )
    })
}

pub(super) fn close(handle: OwnedHandle) -> io::Result<()> {
    unsafe { CloseHandle(handle.into_raw_handle() as HANDLE) }.true_val_or_errno(())
}

/// A broken pipe on the reading side means that the writer is gone, which is end-of-stream.
pub(super) fn downgrade_eof(r: io::Result<usize>) -> io::Result<usize> {
    match r {
        Err(e) if e.raw_os_error().eeq(ERROR_BROKEN_PIPE) => Ok(0),
        els => els,
    }
}

/// The error reported for operations on a handle that has already been closed.
#[allow(clippy::cast_possible_wrap)]
#[inline]
pub(crate) fn bad_descriptor() -> io::Error {
    io::Error::from_raw_os_error(ERROR_INVALID_HANDLE as i32)
}

/// `ReadFile` on an empty `PIPE_NOWAIT` pipe fails with `ERROR_NO_DATA`, which the standard
/// library does not classify as `WouldBlock`.
#[inline]
pub(crate) fn is_would_block(e: &io::Error) -> bool { e.raw_os_error().eeq(ERROR_NO_DATA) }
