use super::unixprelude::*;
use crate::{Error, LinkKind, Result};
use std::{ffi::CString, io, path::Path};

fn to_cstring(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

pub(crate) fn create_link(origin: &Path, target: &Path, kind: LinkKind) -> Result<()> {
    let context = kind.failure_context();
    let (origin, target) = to_cstring(origin)
        .and_then(|o| Ok((o, to_cstring(target)?)))
        .map_err(|e| Error::io(context, e))?;

    let success = unsafe {
        match kind {
            LinkKind::Hard => libc::link(origin.as_ptr(), target.as_ptr()),
            LinkKind::Symbolic => libc::symlink(origin.as_ptr(), target.as_ptr()),
        }
    } != -1;
    ok_or_errno!(success => ()).map_err(|e| Error::io(context, e))
}
