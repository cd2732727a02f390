//! cmdport - remote-control endpoint
//!
//! Accepts one HTTP POST per TCP connection, parses its body into commands
//! and hands them to the host application over a channel.

pub mod command;
pub mod config;
pub mod delivery;
pub mod error;
pub mod http;
pub mod server;

pub use command::{CommandList, CommandParser, GrammarError};
pub use error::Rejection;
pub use server::listener::{ListenError, ListenerHandle};
