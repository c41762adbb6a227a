//! Wire protocol shared by the console and the retrieval backend.
//!
//! This crate defines the payloads exchanged with the backend routes
//! (`/prompt`, `/query` and the health routes) together with the
//! [`Endpoint`] abstraction, which treats the backend as a black box that
//! accepts a JSON body and answers with a JSON body plus an HTTP status.
//!
//! Types in this crate don't define any presentation behavior. Rendering
//! and state handling live in the controller crate.

#![deny(missing_docs)]

mod chat;
mod endpoint;
mod error;
mod health;
mod prompt;
mod query;
mod turn;

pub use chat::*;
pub use endpoint::*;
pub use error::*;
pub use health::*;
pub use prompt::*;
pub use query::*;
pub use turn::*;
