#![doc = include_str!("../README.md")]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
// If this was in Cargo.toml, it would cover tests as well
#![warn(
    missing_docs,
    clippy::panic_in_result_fn,
    clippy::missing_assert_message,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

#[macro_use]
mod macros;

pub mod descriptor;
pub mod error;
pub mod host;
pub mod link;
pub mod pipe;

/// Platform-specific implementations of the descriptor operations.
///
/// Only one of `unix` and `windows` is compiled in. Besides the public descriptor type, both have
/// the same crate-internal surface (`pipe`, `create_link`, `bad_descriptor`, `is_would_block`),
/// which the portable modules pick up via `impmod!`.
pub mod os {
    #[cfg(unix)]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(unix)))]
    pub mod unix;
    #[cfg(windows)]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(windows)))]
    pub mod windows;
}

pub use {
    descriptor::{Descriptor, OsDescriptor},
    error::{Error, Result},
    link::{create_link, LinkKind},
    pipe::{pipe, PipeOptions, PipeReader, PipeWriter, ReadMode},
};

mod misc;
pub(crate) use misc::*;

#[cfg(test)]
#[path = "../tests/index.rs"]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests;
