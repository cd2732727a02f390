//! Turning request bodies into commands.
//!
//! The grammar is pluggable through [`CommandParser`]; the endpoint only
//! strips framing bytes from the body and interprets the parser's outcome.

pub mod action;

pub use action::{Action, ActionParser};

use thiserror::Error;

use crate::error::Rejection;

/// Error message reported by a command grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GrammarError(pub String);

impl GrammarError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A grammar that turns a body string into an ordered list of commands.
pub trait CommandParser: Send + Sync + 'static {
    type Command: Send + 'static;

    /// Parses `input`. An empty list is a valid outcome here; the bridge
    /// decides what to do with it.
    fn parse(&self, input: &str) -> Result<Vec<Self::Command>, GrammarError>;
}

/// A non-empty, ordered list of commands from a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandList<C>(Vec<C>);

impl<C> CommandList<C> {
    /// Wraps `commands`, or returns `None` if there are none.
    pub fn new(commands: Vec<C>) -> Option<Self> {
        if commands.is_empty() {
            None
        } else {
            Some(Self(commands))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<C> {
        self.0
    }
}

impl<C> IntoIterator for CommandList<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Strips leading and trailing CR/LF bytes.
pub fn trim_body(body: &[u8]) -> &[u8] {
    let is_framing = |b: &u8| *b == b'\r' || *b == b'\n';
    let start = body.iter().position(|b| !is_framing(b)).unwrap_or(body.len());
    let end = body.iter().rposition(|b| !is_framing(b)).map_or(start, |i| i + 1);
    &body[start..end]
}

/// Runs the grammar over an accumulated request body.
pub fn commands_from_body<P>(parser: &P, body: &[u8]) -> Result<CommandList<P::Command>, Rejection>
where
    P: CommandParser + ?Sized,
{
    let text = String::from_utf8_lossy(trim_body(body));
    // The grammar sees empty input too and may reject it with its own message.
    let commands = parser.parse(&text)?;
    CommandList::new(commands).ok_or(Rejection::NoAction)
}
