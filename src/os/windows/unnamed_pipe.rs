use super::{c_wrappers, FileHandle};
use crate::PipeOptions;
use std::io;

pub(crate) fn pipe(options: &PipeOptions) -> io::Result<(FileHandle, FileHandle)> {
    let hint = match options.buffer_size_hint {
        Some(num) => u32::try_from(num.get()).unwrap_or(u32::MAX),
        None => 0,
    };
    let (r, w) = c_wrappers::create_pipe(hint)?;
    Ok((FileHandle(r), FileHandle(w)))
}
