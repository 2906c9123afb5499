//! Hard and symbolic link creation.
//!
//! This is a thin wrapper over `link(2)`/`symlink(2)` on Unix and `CreateHardLinkW`/
//! `CreateSymbolicLinkW` on Windows. It holds no state.

use crate::{contains_nuls, Error, Result};
use std::path::Path;

impmod! {link, create_link as create_link_impl}

/// Which kind of filesystem link to create.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Another directory entry for the same file.
    #[default]
    Hard,
    /// A link that stores the origin path and is resolved on access.
    Symbolic,
}
impl LinkKind {
    /// `true` selects [`Symbolic`](Self::Symbolic), `false` selects [`Hard`](Self::Hard).
    #[inline]
    pub const fn from_symbolic_flag(symbolic: bool) -> Self {
        if symbolic {
            Self::Symbolic
        } else {
            Self::Hard
        }
    }
    pub(crate) const fn failure_context(self) -> &'static str {
        match self {
            Self::Hard => "failed to create hard link",
            Self::Symbolic => "failed to create symbolic link",
        }
    }
}

/// Creates a link at `target` that points to `origin`.
///
/// On Windows, creating a symbolic link first checks whether `origin` is a directory (resolving a
/// relative `origin` against the directory of `target`, like the link itself will be), since
/// directory symlinks are a distinct kind there. If that check fails, its error is returned and no
/// link is created.
///
/// # Errors
/// - [`InvalidArgument`](Error::InvalidArgument) if either path contains a NUL byte.
/// - [`Io`](Error::Io) with the OS error code for any failure of the underlying system calls.
pub fn create_link(
    origin: impl AsRef<Path>,
    target: impl AsRef<Path>,
    kind: LinkKind,
) -> Result<()> {
    let (origin, target) = (origin.as_ref(), target.as_ref());
    for (position, path) in [(1, origin), (2, target)] {
        if contains_nuls(path.as_os_str().as_encoded_bytes()) {
            return Err(Error::argument(position, "path contains interior nul byte"));
        }
    }
    log::debug!("creating {kind:?} link {} -> {}", target.display(), origin.display());
    create_link_impl(origin, target, kind)
}
