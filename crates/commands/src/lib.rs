//! Command interface for tabclust.
//!
//! A host sends `{"action": ..., "data": ...}` and always gets back either
//! `{"result": ...}` or `{"error": "..."}`; failures never escape as panics
//! or closed pipes.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod command;
mod error;
mod handlers;
mod server;

pub use command::{Command, CommandAction, CommandRequest};
pub use error::CommandError;
pub use handlers::{CommandResponse, dispatch, handle_line};
pub use server::{run_command_server, serve};
