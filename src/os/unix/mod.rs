//! Unix-specific pipe and link primitives.
//!
//! Pipe ends are plain file descriptors. Nonblocking mode is the `O_NONBLOCK` file status flag,
//! and non-inheritance is the `FD_CLOEXEC` descriptor flag, which is set atomically via `pipe2`
//! where the platform has it.

pub(crate) mod c_wrappers;
mod fdops;
pub(crate) mod link;
pub(crate) mod unnamed_pipe;

pub use fdops::FdOps;

mod unixprelude {
    #[allow(unused_imports)]
    pub use {
        libc::{c_int, c_void},
        std::os::unix::{
            ffi::OsStrExt,
            io::{AsFd, AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd, RawFd},
        },
    };
}
