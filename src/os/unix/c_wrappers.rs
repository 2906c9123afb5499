use super::unixprelude::*;
use crate::FdOrErrno;
use std::io;

pub(super) unsafe fn fcntl_int(fd: BorrowedFd<'_>, cmd: c_int, val: c_int) -> io::Result<c_int> {
    let val = unsafe { libc::fcntl(fd.as_raw_fd(), cmd, val) };
    ok_or_errno!(val != -1 => val)
}

pub(super) fn get_status_flags(fd: BorrowedFd<'_>) -> io::Result<c_int> {
    // SAFETY: F_GETFL ignores its argument
    unsafe { fcntl_int(fd, libc::F_GETFL, 0) }
}

pub(super) fn get_nonblocking(fd: BorrowedFd<'_>) -> io::Result<bool> {
    Ok(get_status_flags(fd)? & libc::O_NONBLOCK != 0)
}

pub(super) fn set_nonblocking(fd: BorrowedFd<'_>, nonblocking: bool) -> io::Result<()> {
    let old_flags = get_status_flags(fd)?;
    let new_flags = if nonblocking {
        old_flags | libc::O_NONBLOCK
    } else {
        // Inverting the O_NONBLOCK value sets all the bits in the flag set to 1 except for the
        // nonblocking flag, which clears the flag when ANDed.
        old_flags & !libc::O_NONBLOCK
    };
    // SAFETY: new_flags is a c_int, as documented in the manpage.
    unsafe { fcntl_int(fd, libc::F_SETFL, new_flags) }?;
    Ok(())
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
pub(super) fn set_cloexec(fd: BorrowedFd<'_>) -> io::Result<()> {
    // SAFETY: F_GETFD ignores its argument, F_SETFD takes a flag set
    unsafe {
        let flags = fcntl_int(fd, libc::F_GETFD, 0)?;
        fcntl_int(fd, libc::F_SETFD, flags | libc::FD_CLOEXEC)?;
    }
    Ok(())
}

/// Blocks until `fd` is readable or has hung up.
pub(super) fn poll_readable(fd: BorrowedFd<'_>) -> io::Result<()> {
    let mut pfd = libc::pollfd {
        fd: fd.as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };
    loop {
        let success = unsafe { libc::poll(&mut pfd, 1, -1) } != -1;
        match ok_or_errno!(success => ()) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            els => return els,
        }
    }
}

pub(super) fn close(fd: OwnedFd) -> io::Result<()> {
    let success = unsafe { libc::close(fd.into_raw_fd()) } != -1;
    ok_or_errno!(success => ())
}

pub(super) fn make_pipe(flags: c_int) -> io::Result<[OwnedFd; 2]> {
    let mut fds: [c_int; 2] = [-1; 2];
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
    let ret = unsafe { libc::pipe2(fds.as_mut_ptr(), flags) };
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
    let ret = {
        let _ = flags;
        unsafe { libc::pipe(fds.as_mut_ptr()) }
    };
    ret.fd_or_errno()?;
    let [r, w] = fds;
    // SAFETY: we just created both of those file descriptors, which means that neither of them
    // can be in use elsewhere.
    Ok(unsafe { [OwnedFd::from_raw_fd(r), OwnedFd::from_raw_fd(w)] })
}

/// The error reported for operations on a handle that has already been closed.
#[inline]
pub(crate) fn bad_descriptor() -> io::Error { io::Error::from_raw_os_error(libc::EBADF) }

pub(crate) fn is_would_block(e: &io::Error) -> bool {
    matches!(e.raw_os_error(), Some(code) if code == libc::EAGAIN || code == libc::EWOULDBLOCK)
}
