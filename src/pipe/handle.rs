use crate::{Descriptor, Error, Result};
use std::io;

impmod! {c_wrappers, bad_descriptor}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum End {
    Read,
    Write,
}

/// State shared by both pipe ends: the descriptor itself, which is gone once the end has been
/// closed, and the cached nonblocking flag.
#[derive(Debug)]
pub(crate) struct Handle<D> {
    desc: Option<D>,
    nonblocking: bool,
    end: End,
}
impl<D: Descriptor> Handle<D> {
    pub fn new(desc: D, end: End) -> Self { Self { desc: Some(desc), nonblocking: false, end } }

    /// Borrows the descriptor, or fails with the platform's bad-descriptor error if closed.
    #[inline]
    pub fn desc(&mut self) -> io::Result<&mut D> { self.desc.as_mut().ok_or_else(bad_descriptor) }
    #[inline]
    pub fn is_closed(&self) -> bool { self.desc.is_none() }
    #[inline]
    pub fn cached_nonblocking(&self) -> bool { self.nonblocking }

    pub fn is_nonblocking(&mut self) -> Result<bool> {
        let context = "failed nonblocking check";
        let desc =
            self.desc.as_ref().ok_or_else(bad_descriptor).map_err(|e| Error::io(context, e))?;
        // Objects without a nonblocking mode are as good as blocking.
        let nonblocking = desc.nonblocking().map_err(|e| Error::io(context, e))?.unwrap_or(false);
        self.nonblocking = nonblocking;
        Ok(nonblocking)
    }

    pub fn set_nonblocking(&mut self, nonblocking: bool) -> Result<bool> {
        let context = "failed to set nonblocking mode";
        let end = self.end;
        let desc = self.desc().map_err(|e| Error::io(context, e))?;
        let current = desc.nonblocking().map_err(|e| Error::io(context, e))?.unwrap_or(false);
        if current != nonblocking {
            desc.set_nonblocking(nonblocking).map_err(|e| Error::io(context, e))?;
            log::debug!("{end:?} end of pipe switched to nonblocking={nonblocking}");
        }
        self.nonblocking = nonblocking;
        Ok(nonblocking)
    }

    pub fn close(&mut self) -> Result<()> {
        match self.desc.take() {
            Some(desc) => {
                log::debug!("closing {:?} end of pipe", self.end);
                desc.close().map_err(|e| Error::io("close failed", e))
            }
            None => Ok(()),
        }
    }
}
