//! Request rejections.
//!
//! Every protocol-level failure ends the connection with a 400 response whose
//! body is the `Display` text of one of these values.

use thiserror::Error;

use crate::command::GrammarError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The request line is not a `POST /` request.
    #[error("invalid request method")]
    InvalidMethod,

    /// A `Content-Length` header carried a non-numeric value.
    #[error("invalid content length")]
    InvalidContentLength,

    /// The body was empty or parsed into zero commands.
    #[error("no action specified")]
    NoAction,

    /// The command grammar refused the body.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// Nobody is draining the delivery channel anymore.
    #[error("command channel closed")]
    ChannelClosed,
}
