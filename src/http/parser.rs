use bytes::{Bytes, BytesMut};

use crate::error::Rejection;
use crate::http::framer::{CRLF, Token, Tokenizer};

const REQUEST_PREFIX: &[u8] = b"POST / HTTP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    RequestLine,
    Headers,
    Body,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// More tokens are needed.
    Pending,
    /// The state machine reached `Done`.
    Done,
}

/// The part of a request the bridge cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Declared `Content-Length`; 0 when the header was absent.
    pub content_length: i64,
    pub body: Bytes,
}

/// Per-connection parse state. Consumes tokens in order, never goes back.
#[derive(Debug)]
pub struct RequestParser {
    phase: Phase,
    line: usize,
    content_length: i64,
    length_declared: bool,
    body: BytesMut,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            phase: Phase::RequestLine,
            line: 0,
            content_length: 0,
            length_declared: false,
            body: BytesMut::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    /// Number of tokens consumed so far, request line included.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Feeds one token through the state machine.
    pub fn on_token(&mut self, token: &Token) -> Result<Progress, Rejection> {
        let bytes = token.bytes();

        match self.phase {
            Phase::RequestLine => {
                if !bytes.starts_with(REQUEST_PREFIX) {
                    return Err(Rejection::InvalidMethod);
                }
                self.phase = Phase::Headers;
            }
            Phase::Headers => {
                if bytes == CRLF {
                    self.phase = if self.content_length > 0 {
                        Phase::Body
                    } else {
                        Phase::Done
                    };
                } else {
                    self.on_header(bytes)?;
                }
            }
            Phase::Body => {
                self.body.extend_from_slice(bytes);
                if token.is_final() {
                    self.phase = Phase::Done;
                }
            }
            Phase::Done => {}
        }

        self.line += 1;
        Ok(self.progress())
    }

    fn on_header(&mut self, line: &[u8]) -> Result<(), Rejection> {
        let line = String::from_utf8_lossy(line);
        let Some((name, value)) = line.split_once(':') else {
            return Ok(());
        };
        if !name.eq_ignore_ascii_case("content-length") {
            return Ok(());
        }
        let length = value
            .trim()
            .parse::<i64>()
            .map_err(|_| Rejection::InvalidContentLength)?;

        // Once declared, the length is fixed for the rest of the request.
        if self.length_declared {
            return Ok(());
        }
        self.content_length = length;
        self.length_declared = true;
        tracing::trace!(content_length = self.content_length, "content length declared");
        Ok(())
    }

    /// Pulls tokens until the tokenizer runs dry or the request is done.
    ///
    /// Arms the tokenizer with the declared length as soon as the body starts.
    pub fn advance(&mut self, tokens: &mut Tokenizer) -> Result<Progress, Rejection> {
        while self.phase != Phase::Done {
            let Some(token) = tokens.next_token() else {
                return Ok(Progress::Pending);
            };
            self.on_token(&token)?;
            if let Some(bound) = self.body_bound() {
                tokens.arm(bound);
            }
        }
        Ok(Progress::Done)
    }

    /// Length the tokenizer should complete at, once in the body.
    pub fn body_bound(&self) -> Option<usize> {
        match self.phase {
            Phase::Body => usize::try_from(self.content_length).ok(),
            _ => None,
        }
    }

    fn progress(&self) -> Progress {
        if self.phase == Phase::Done {
            Progress::Done
        } else {
            Progress::Pending
        }
    }

    pub fn finish(self) -> Request {
        Request {
            content_length: self.content_length,
            body: self.body.freeze(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_post() {
        let mut tokens = Tokenizer::new();
        tokens.extend_from_slice(b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nup");

        let mut parser = RequestParser::new();
        assert_eq!(parser.advance(&mut tokens).unwrap(), Progress::Done);

        let request = parser.finish();
        assert_eq!(request.content_length, 2);
        assert_eq!(&request.body[..], b"up");
    }
}
