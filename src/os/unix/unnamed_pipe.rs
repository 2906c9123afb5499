use super::{c_wrappers, FdOps};
use crate::PipeOptions;
use std::io;

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "illumos",
    target_os = "solaris",
))]
pub(crate) fn pipe(_options: &PipeOptions) -> io::Result<(FdOps, FdOps)> {
    let [r, w] = c_wrappers::make_pipe(libc::O_CLOEXEC)?;
    Ok((FdOps(r), FdOps(w)))
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "illumos",
    target_os = "solaris",
)))]
pub(crate) fn pipe(_options: &PipeOptions) -> io::Result<(FdOps, FdOps)> {
    use super::unixprelude::AsFd;
    // Both ends are owned before the flags are touched, so an early return closes the pair.
    let [r, w] = c_wrappers::make_pipe(0)?;
    c_wrappers::set_cloexec(r.as_fd())?;
    c_wrappers::set_cloexec(w.as_fd())?;
    Ok((FdOps(r), FdOps(w)))
}
