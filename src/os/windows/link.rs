use crate::{Error, LinkKind, OrErrno, RawOsErrorExt, Result};
use std::{fs, io, path::Path, ptr};
use widestring::U16CString;
use windows_sys::Win32::{
    Foundation::ERROR_INVALID_PARAMETER,
    Storage::FileSystem::{
        CreateHardLinkW, CreateSymbolicLinkW, SYMBOLIC_LINK_FLAG_ALLOW_UNPRIVILEGED_CREATE,
        SYMBOLIC_LINK_FLAG_DIRECTORY,
    },
};

fn to_wide(path: &Path) -> io::Result<U16CString> {
    U16CString::from_os_str(path.as_os_str())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// A relative symlink origin is resolved against the directory the link lives in, so that is
/// where it has to be looked up.
fn origin_is_dir(origin: &Path, target: &Path) -> Result<bool> {
    let resolved = match target.parent() {
        Some(dir) if origin.is_relative() => dir.join(origin),
        _ => origin.to_path_buf(),
    };
    fs::metadata(&resolved).map(|m| m.is_dir()).map_err(|e| {
        Error::io(
            format!("cannot obtain information from path '{}'", origin.display()),
            e,
        )
    })
}

fn symlink(origin: &U16CString, target: &U16CString, flags: u32) -> io::Result<()> {
    let create = |flags| {
        unsafe { CreateSymbolicLinkW(target.as_ptr(), origin.as_ptr(), flags) }
            .true_val_or_errno(())
    };
    match create(flags | SYMBOLIC_LINK_FLAG_ALLOW_UNPRIVILEGED_CREATE) {
        // Older versions of Windows 10 reject the unprivileged flag outright.
        Err(e) if e.raw_os_error().eeq(ERROR_INVALID_PARAMETER) => create(flags),
        els => els,
    }
}

pub(crate) fn create_link(origin: &Path, target: &Path, kind: LinkKind) -> Result<()> {
    let context = kind.failure_context();
    let flags = match kind {
        LinkKind::Symbolic if origin_is_dir(origin, target)? => SYMBOLIC_LINK_FLAG_DIRECTORY,
        _ => 0,
    };
    let (w_origin, w_target) = to_wide(origin)
        .and_then(|o| Ok((o, to_wide(target)?)))
        .map_err(|e| Error::io(context, e))?;

    match kind {
        LinkKind::Hard => {
            unsafe { CreateHardLinkW(w_target.as_ptr(), w_origin.as_ptr(), ptr::null()) }
                .true_val_or_errno(())
        }
        LinkKind::Symbolic => symlink(&w_origin, &w_target, flags),
    }
    .map_err(|e| Error::io(context, e))
}
