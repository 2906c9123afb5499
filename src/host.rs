//! The call surface for an embedding host, such as a scripting language runtime.
//!
//! A host exposes pipe ends to its scripts as opaque objects with methods. This module does the
//! part of that binding which does not depend on the host: the [`PipeMethods`] interface that
//! both pipe ends implement, the table of method names ([`METHODS`]), and the decoding of loosely
//! typed [`Value`] arguments into calls, with [`Error::InvalidArgument`] for anything malformed.
//! Argument errors are always raised before the descriptor is touched.
//!
//! Argument positions in errors count the receiving pipe end as #1, so the first argument after
//! it is #2. For [`mklink`], which has no receiver, the origin path is #1.
//!
//! The free functions [`pipe`] and [`mklink`] complete the set of operations a host registers.

use crate::{
    create_link, error::Error, Descriptor, LinkKind, PipeReader, PipeWriter, ReadMode, Result,
};
use std::{borrow::Cow, path::PathBuf};

impmod! {c_wrappers, bad_descriptor}

/// A host-side value, as passed to and returned from [`call`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// The absence of a value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A byte string.
    Bytes(Vec<u8>),
}
impl Value {
    /// Whether the host would treat this value as true in a condition: everything except `Nil`
    /// and `false`.
    #[inline]
    pub fn is_truthy(&self) -> bool { !matches!(self, Self::Nil | Self::Bool(false)) }
}
impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self { Self::Bool(b) }
}
impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Self { Self::Int(i) }
}
impl From<Vec<u8>> for Value {
    #[inline]
    fn from(b: Vec<u8>) -> Self { Self::Bytes(b) }
}
impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self { Self::Bytes(s.as_bytes().to_vec()) }
}

/// The operations every pipe end exposes to the host.
///
/// Both ends implement all of them, since the host sees a single object type. Reading from a
/// writing end or writing to a reading end fails with the same bad-descriptor error the OS gives
/// for a read on a write-only descriptor.
pub trait PipeMethods {
    /// Reads according to `mode`.
    fn read(&mut self, mode: ReadMode) -> Result<Vec<u8>>;
    /// Writes each part in order, stopping at the first one not written in full.
    fn write(&mut self, parts: &[&[u8]]) -> Result<()>;
    /// Closes the end. Closing twice succeeds.
    fn close(&mut self) -> Result<()>;
    /// Queries the nonblocking mode.
    fn is_nonblocking(&mut self) -> Result<bool>;
    /// Changes the nonblocking mode and returns the resulting mode.
    fn set_nonblocking(&mut self, nonblocking: bool) -> Result<bool>;
}
impl<D: Descriptor> PipeMethods for PipeReader<D> {
    #[inline]
    fn read(&mut self, mode: ReadMode) -> Result<Vec<u8>> { self.read_with(mode) }
    fn write(&mut self, _: &[&[u8]]) -> Result<()> {
        Err(Error::io("write failed", bad_descriptor()))
    }
    #[inline]
    fn close(&mut self) -> Result<()> { PipeReader::close(self) }
    #[inline]
    fn is_nonblocking(&mut self) -> Result<bool> { PipeReader::is_nonblocking(self) }
    #[inline]
    fn set_nonblocking(&mut self, nonblocking: bool) -> Result<bool> {
        PipeReader::set_nonblocking(self, nonblocking)
    }
}
impl<D: Descriptor> PipeMethods for PipeWriter<D> {
    fn read(&mut self, _: ReadMode) -> Result<Vec<u8>> {
        Err(Error::io("read failed", bad_descriptor()))
    }
    #[inline]
    fn write(&mut self, parts: &[&[u8]]) -> Result<()> { self.write_parts(parts).map(|_| ()) }
    #[inline]
    fn close(&mut self) -> Result<()> { PipeWriter::close(self) }
    #[inline]
    fn is_nonblocking(&mut self) -> Result<bool> { PipeWriter::is_nonblocking(self) }
    #[inline]
    fn set_nonblocking(&mut self, nonblocking: bool) -> Result<bool> {
        PipeWriter::set_nonblocking(self, nonblocking)
    }
}

/// A method of a pipe end, as named in [`METHODS`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// `read(count | selector)`
    Read,
    /// `write(part, ...)`
    Write,
    /// `close()`
    Close,
    /// `is_nonblocking()`
    IsNonblocking,
    /// `set_nonblocking([enabled = true])`
    SetNonblocking,
}
impl Method {
    /// The name under which the host registers the method.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Close => "close",
            Self::IsNonblocking => "is_nonblocking",
            Self::SetNonblocking => "set_nonblocking",
        }
    }
    /// Looks a method up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        METHODS.iter().copied().find(|m| m.name() == name)
    }
}

/// Every method a pipe end has, for the host to register once at startup.
pub static METHODS: [Method; 5] = [
    Method::Read,
    Method::Write,
    Method::Close,
    Method::IsNonblocking,
    Method::SetNonblocking,
];

fn decode_read_mode(arg: Option<&Value>) -> Result<ReadMode> {
    const POS: usize = 2;
    match arg {
        Some(Value::Int(count)) => usize::try_from(*count)
            .map(ReadMode::Exact)
            .map_err(|_| Error::argument(POS, "byte count must be non-negative")),
        Some(Value::Bytes(selector)) => std::str::from_utf8(selector)
            .ok()
            .and_then(ReadMode::from_selector)
            .ok_or_else(|| Error::argument(POS, "invalid format")),
        _ => Err(Error::argument(POS, "number or string expected")),
    }
}

fn decode_part(position: usize, arg: &Value) -> Result<Cow<'_, [u8]>> {
    match arg {
        Value::Bytes(b) => Ok(Cow::Borrowed(b.as_slice())),
        // Hosts with automatic number-to-string coercion accept numbers here.
        Value::Int(i) => Ok(Cow::Owned(i.to_string().into_bytes())),
        _ => Err(Error::argument(position, "string expected")),
    }
}

/// Invokes `method` on `handle` with the arguments following the receiver.
///
/// On success, returns the values the method produces: the bytes read for `read`, the resulting
/// mode for the nonblocking methods, `true` for `close`, and nothing for `write` (whose host
/// binding returns the receiver itself so that calls can be chained).
///
/// # Errors
/// [`Error::InvalidArgument`] for malformed arguments, otherwise whatever the method itself
/// fails with. [`failure_values`] turns an error into the values the host returns to the script.
pub fn call<H: PipeMethods + ?Sized>(
    handle: &mut H,
    method: Method,
    args: &[Value],
) -> Result<Vec<Value>> {
    match method {
        Method::Read => {
            let mode = decode_read_mode(args.first())?;
            handle.read(mode).map(|data| vec![Value::Bytes(data)])
        }
        Method::Write => {
            let parts = args
                .iter()
                .enumerate()
                .map(|(i, arg)| decode_part(i.saturating_add(2), arg))
                .collect::<Result<Vec<_>>>()?;
            let parts = parts.iter().map(|p| &**p).collect::<Vec<&[u8]>>();
            handle.write(&parts).map(|()| Vec::new())
        }
        Method::Close => handle.close().map(|()| vec![Value::Bool(true)]),
        Method::IsNonblocking => handle.is_nonblocking().map(|nb| vec![Value::Bool(nb)]),
        Method::SetNonblocking => {
            let nonblocking = match args.first() {
                None | Some(Value::Nil) => true,
                Some(Value::Bool(b)) => *b,
                Some(_) => return Err(Error::argument(2, "boolean expected")),
            };
            handle.set_nonblocking(nonblocking).map(|nb| vec![Value::Bool(nb)])
        }
    }
}

/// Creates a pipe for the host: `pipe()`. Both ends come back as method receivers, reading end
/// first, ready to be wrapped in the host's object type.
///
/// # Errors
/// Whatever [`crate::pipe()`] fails with.
pub fn pipe() -> Result<[Box<dyn PipeMethods + Send>; 2]> {
    let (reader, writer) = crate::pipe()?;
    Ok([Box::new(reader), Box::new(writer)])
}

/// Unix paths are arbitrary bytes, so they are taken as they are.
#[cfg(unix)]
fn bytes_to_path(_position: usize, bytes: &[u8]) -> Result<PathBuf> {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}
#[cfg(windows)]
fn bytes_to_path(position: usize, bytes: &[u8]) -> Result<PathBuf> {
    std::str::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|_| Error::argument(position, "path is not valid UTF-8"))
}

fn decode_path(position: usize, arg: Option<&Value>) -> Result<PathBuf> {
    match arg {
        Some(Value::Bytes(b)) => bytes_to_path(position, b),
        _ => Err(Error::argument(position, "string expected")),
    }
}

/// Creates a link from host arguments: `mklink(origin, target, [symbolic = false])`.
///
/// # Errors
/// [`Error::InvalidArgument`] for malformed arguments, otherwise whatever
/// [`create_link`] fails with.
pub fn mklink(args: &[Value]) -> Result<()> {
    let origin = decode_path(1, args.first())?;
    let target = decode_path(2, args.get(1))?;
    let symbolic = args.get(2).map_or(false, Value::is_truthy);
    create_link(origin, target, LinkKind::from_symbolic_flag(symbolic))
}

/// Converts an error into the values a host returns to a script on failure: the partially read
/// bytes (or nil), the error message, and the OS error code (or nil).
pub fn failure_values(err: &Error) -> Vec<Value> {
    let data = match err.partial_data() {
        Some(data) => Value::Bytes(data.to_vec()),
        None => Value::Nil,
    };
    let code = match err.os_code() {
        Some(code) => Value::Int(code.into()),
        None => Value::Nil,
    };
    vec![data, Value::Bytes(err.to_string().into_bytes()), code]
}
