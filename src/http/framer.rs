//! Dual-mode request tokenizer.
//!
//! The request line and headers are framed by CRLF. Once the body starts and a
//! positive `Content-Length` is known, the tokenizer is armed with that length
//! and also completes as soon as enough bytes have been observed. End of stream
//! always flushes whatever is buffered as the final token.

use bytes::{Bytes, BytesMut};

pub const CRLF: &[u8] = b"\r\n";

/// Inputs to the boundary decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameState {
    /// Declared body length, set once the body phase begins.
    pub length_bound: Option<usize>,
    /// Bytes emitted as tokens since the bound was armed.
    pub accumulated: usize,
    /// The peer has closed its write half.
    pub eof: bool,
}

/// Where the next token ends in the buffered bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A CRLF-terminated line of the given length (CRLF included).
    Line(usize),
    /// Everything buffered is the last token of the request.
    Final(usize),
    /// Nothing can be emitted until more bytes arrive.
    NeedMore,
    /// The stream ended with nothing left to emit.
    Exhausted,
}

/// Decides the next token boundary for `buf` under `state`.
///
/// Pure: it never touches I/O, so any fragmentation of the input can be
/// replayed against it.
pub fn find_boundary(buf: &[u8], state: &FrameState) -> Boundary {
    if let Some(pos) = buf.windows(CRLF.len()).position(|w| w == CRLF) {
        return Boundary::Line(pos + CRLF.len());
    }

    if state.eof {
        return if buf.is_empty() {
            Boundary::Exhausted
        } else {
            Boundary::Final(buf.len())
        };
    }

    match state.length_bound {
        Some(bound) if state.accumulated + buf.len() >= bound => Boundary::Final(buf.len()),
        _ => Boundary::NeedMore,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Line(Bytes),
    Final(Bytes),
}

impl Token {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Token::Line(b) | Token::Final(b) => b,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Token::Final(_))
    }
}

/// Buffers raw reads and hands out tokens one at a time.
#[derive(Debug, Default)]
pub struct Tokenizer {
    buffer: BytesMut,
    state: FrameState,
    finished: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            state: FrameState::default(),
            finished: false,
        }
    }

    pub fn extend_from_slice(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Marks end of stream; buffered bytes become the final token.
    pub fn set_eof(&mut self) {
        self.state.eof = true;
    }

    /// Switches to length-based completion. The first bound wins.
    pub fn arm(&mut self, length: usize) {
        if self.state.length_bound.is_none() {
            self.state.length_bound = Some(length);
            self.state.accumulated = 0;
        }
    }

    /// No further tokens will ever be produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = match find_boundary(&self.buffer, &self.state) {
            Boundary::Line(len) => Token::Line(self.buffer.split_to(len).freeze()),
            Boundary::Final(len) => {
                self.finished = true;
                Token::Final(self.buffer.split_to(len).freeze())
            }
            Boundary::NeedMore => return None,
            Boundary::Exhausted => {
                self.finished = true;
                return None;
            }
        };

        if self.state.length_bound.is_some() {
            self.state.accumulated += token.bytes().len();
        }
        Some(token)
    }
}
