//! Windows-specific pipe and link primitives.
//!
//! Pipe ends are anonymous pipe handles from `CreatePipe`. Anonymous pipes are named pipes with
//! a hidden name as far as the kernel is concerned, so the nonblocking mode is the `PIPE_NOWAIT`
//! bit of the named pipe handle state.

pub(crate) mod c_wrappers;
mod file_handle;
pub(crate) mod link;
pub(crate) mod unnamed_pipe;

pub use file_handle::FileHandle;

mod winprelude {
    #[allow(unused_imports)]
    pub(crate) use {
        std::os::windows::prelude::*,
        windows_sys::Win32::Foundation::{BOOL, HANDLE, INVALID_HANDLE_VALUE},
    };

    pub(crate) trait AsIntHandle {
        fn as_int_handle(&self) -> HANDLE;
    }
    impl<T: AsHandle + ?Sized> AsIntHandle for T {
        #[inline(always)]
        fn as_int_handle(&self) -> HANDLE { self.as_handle().as_raw_handle() as HANDLE }
    }
}
