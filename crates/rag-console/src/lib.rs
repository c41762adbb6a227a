//! A console for the retrieval-augmented backend.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to drive the backend from your own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod console;
#[cfg(feature = "cli")]
mod terminal;

pub use console::{Console, ConsoleBuilder};
#[cfg(feature = "cli")]
pub use terminal::TerminalSurface;

/// Re-exports of [`rag_console_core`] crate.
pub mod core {
    pub use rag_console_core::*;
}
