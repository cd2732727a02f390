use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::command::{CommandParser, commands_from_body};
use crate::delivery::CommandSender;
use crate::error::Rejection;
use crate::http::framer::Tokenizer;
use crate::http::parser::{Progress, Request, RequestParser};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Handles exactly one request on one stream, then closes it.
pub struct Connection<S, P: CommandParser> {
    stream: S,
    parser: Arc<P>,
    sender: CommandSender<P::Command>,
    tokens: Tokenizer,
    request: RequestParser,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    Writing(ResponseWriter, Response),
    Closed,
}

impl<S, P> Connection<S, P>
where
    S: AsyncRead + AsyncWrite + Unpin,
    P: CommandParser,
{
    pub fn new(stream: S, parser: Arc<P>, sender: CommandSender<P::Command>) -> Self {
        Self {
            stream,
            parser,
            sender,
            tokens: Tokenizer::new(),
            request: RequestParser::new(),
            state: ConnectionState::Reading,
        }
    }

    /// Runs the connection to completion and returns the response it sent.
    pub async fn run(mut self) -> anyhow::Result<Response> {
        let mut sent = None;

        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Ok(request) => ConnectionState::Dispatching(request),
                        Err(rejection) => self.reject(rejection),
                    };
                }

                ConnectionState::Dispatching(request) => {
                    self.state = match self.dispatch(&request).await {
                        Ok(()) => {
                            let response = Response::Ok;
                            ConnectionState::Writing(ResponseWriter::new(&response), response)
                        }
                        Err(rejection) => self.reject(rejection),
                    };
                }

                ConnectionState::Writing(mut writer, response) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    tracing::debug!(status = response.status().as_u16(), "response sent");
                    sent = Some(response);
                }

                ConnectionState::Closed => break,
            }
        }

        // Unread bytes, if any, are dropped with the stream.
        if let Err(e) = self.stream.shutdown().await {
            tracing::trace!(error = %e, "shutdown after response failed");
        }

        sent.ok_or_else(|| anyhow::anyhow!("connection closed without a response"))
    }

    /// Reads until the request state machine is done, fails, or the peer
    /// stops sending.
    async fn read_request(&mut self) -> anyhow::Result<Result<Request, Rejection>> {
        loop {
            match self.request.advance(&mut self.tokens) {
                Ok(Progress::Done) => break,
                Ok(Progress::Pending) if self.tokens.is_finished() => break,
                Ok(Progress::Pending) => {}
                Err(rejection) => return Ok(Err(rejection)),
            }

            let mut temp = [0u8; 1024];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                self.tokens.set_eof();
            } else {
                self.tokens.extend_from_slice(&temp[..n]);
            }
        }

        tracing::trace!(
            lines = self.request.lines_read(),
            phase = ?self.request.phase(),
            "request read"
        );

        let request = std::mem::take(&mut self.request).finish();
        Ok(Ok(request))
    }

    async fn dispatch(&self, request: &Request) -> Result<(), Rejection> {
        // Without a declared length the body is empty; the grammar still runs.
        let commands = commands_from_body(self.parser.as_ref(), &request.body)?;
        let count = commands.len();

        self.sender
            .send(commands)
            .await
            .map_err(|_| Rejection::ChannelClosed)?;

        tracing::debug!(commands = count, "commands delivered");
        Ok(())
    }

    fn reject(&self, rejection: Rejection) -> ConnectionState {
        tracing::warn!(reason = %rejection, "request rejected");
        let response = Response::bad_request(rejection.to_string());
        ConnectionState::Writing(ResponseWriter::new(&response), response)
    }
}
