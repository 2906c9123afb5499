use crate::Descriptor;
use std::{
    cell::RefCell,
    collections::VecDeque,
    io,
    rc::Rc,
};

/// What a [`ScriptedDescriptor`] does and what has been done to it.
#[derive(Debug, Default)]
pub struct Script {
    /// Outcomes of upcoming read calls. Data longer than the read buffer is split across calls;
    /// an empty queue reads as end-of-stream.
    pub reads: VecDeque<io::Result<Vec<u8>>>,
    /// Every write call's accepted bytes, in order.
    pub writes: Vec<Vec<u8>>,
    /// Most bytes a single write call accepts.
    pub write_limit: Option<usize>,
    /// The "OS-level" nonblocking flag.
    pub nonblocking: bool,
    /// Fails every mode change with this OS error code.
    pub set_error: Option<i32>,
    pub set_calls: usize,
    pub read_calls: usize,
    pub waits: usize,
    pub closes: usize,
}

/// A descriptor whose behavior is dictated by a shared [`Script`], so that the test can inspect
/// it after the descriptor has been moved into a pipe end.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDescriptor(pub Rc<RefCell<Script>>);
impl ScriptedDescriptor {
    pub fn new() -> Self { Self::default() }
    pub fn reading(reads: impl IntoIterator<Item = io::Result<Vec<u8>>>) -> Self {
        let slf = Self::new();
        slf.0.borrow_mut().reads.extend(reads);
        slf
    }
    pub fn script(&self) -> std::cell::RefMut<'_, Script> { self.0.borrow_mut() }
}

/// Shorthand for a successful scripted read.
pub fn data(bytes: &str) -> io::Result<Vec<u8>> { Ok(bytes.as_bytes().to_vec()) }
/// Shorthand for a scripted would-block error.
pub fn would_block() -> io::Result<Vec<u8>> { Err(io::ErrorKind::WouldBlock.into()) }

impl Descriptor for ScriptedDescriptor {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut script = self.0.borrow_mut();
        script.read_calls += 1;
        match script.reads.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut bytes)) => {
                let len = bytes.len().min(buf.len());
                let rest = bytes.split_off(len);
                buf[..len].copy_from_slice(&bytes);
                if !rest.is_empty() {
                    script.reads.push_front(Ok(rest));
                }
                Ok(len)
            }
        }
    }
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut script = self.0.borrow_mut();
        let len = script.write_limit.map_or(buf.len(), |lim| lim.min(buf.len()));
        script.writes.push(buf[..len].to_vec());
        Ok(len)
    }
    fn nonblocking(&self) -> io::Result<Option<bool>> { Ok(Some(self.0.borrow().nonblocking)) }
    fn set_nonblocking(&mut self, nonblocking: bool) -> io::Result<()> {
        let mut script = self.0.borrow_mut();
        script.set_calls += 1;
        if let Some(code) = script.set_error {
            return Err(io::Error::from_raw_os_error(code));
        }
        script.nonblocking = nonblocking;
        Ok(())
    }
    fn wait_readable(&mut self) -> io::Result<()> {
        self.0.borrow_mut().waits += 1;
        Ok(())
    }
    fn close(self) -> io::Result<()> {
        self.0.borrow_mut().closes += 1;
        Ok(())
    }
}
