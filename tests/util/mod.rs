//! Test utilities: error reporting through `color-eyre`, a scripted stand-in for an OS descriptor,
//! and a watchdog for tests that could otherwise hang on a blocking read.
#![allow(dead_code, unused_macros)]

#[macro_use]
mod eyre;
mod script;

#[allow(unused_imports)]
pub use {eyre::*, script::*};

use color_eyre::eyre::bail;
use std::{sync::mpsc, thread, time::Duration};

const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs `f` on its own thread and fails the test if it does not finish in time.
pub fn test_wrapper(f: impl (FnOnce() -> TestResult) + Send + 'static) -> TestResult {
    eyre::install();
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("test body".to_owned())
        .spawn(move || {
            let _ = tx.send(f());
        })?;
    match rx.recv_timeout(WATCHDOG_TIMEOUT) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            bail!("test timed out (probably blocked on a read)")
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => bail!("test body panicked"),
    }
}
