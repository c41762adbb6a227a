//! Controllers that drive the console: the chat transcript, the
//! single-shot prompt and the vector query, plus the display surface they
//! render into.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod builder;
mod chat;
mod citation;
mod endpoint_client;
mod error;
mod flight;
mod health;
pub mod notice;
mod prompt;
mod query;
pub mod surface;
mod transcript;

pub use builder::ControllerBuilder;
pub use chat::{ChatController, ChatOutcome};
pub use citation::render_citations;
pub use error::SubmitError;
pub use health::probe_health;
pub use prompt::{PromptController, render_prompt_reply};
pub use query::QueryController;
pub use surface::{MemorySurface, Pane, Surface};
pub use transcript::Transcript;

/// Re-exports of [`rag_console_proto`] crate.
pub mod proto {
    pub use rag_console_proto::*;
}
