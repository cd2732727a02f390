//! HTTP request framing for the command endpoint.
//!
//! Every connection carries exactly one `POST /` request. Nothing here is a
//! general HTTP server: only `Content-Length` is interpreted, and the reply is
//! either a bare `200 OK` or a `400 Bad Request` with a one-line message.
//!
//! # Architecture
//!
//! - **`framer`**: Splits raw bytes into CRLF lines, switching to
//!   length-based completion once the body starts
//! - **`parser`**: The request state machine fed by the framer
//! - **`connection`**: Drives one connection from first read to close
//! - **`response`**: The two response kinds
//! - **`writer`**: Serializes and writes responses to the client
//!
//! # Request State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │ RequestLine │ ← must start with "POST / HTTP"
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │   Headers   │ ← Content-Length recorded, rest ignored
//!        └──────┬──────┘
//!               │ blank line
//!               ├─ Content-Length <= 0 → Done
//!               ▼
//!        ┌─────────────┐
//!        │    Body     │ ← until the declared length or end of stream
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │    Done     │
//!        └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cmdport::command::ActionParser;
//! use cmdport::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:6266").await?;
//!     let (tx, _rx) = cmdport::delivery::channel(16);
//!     let parser = Arc::new(ActionParser::new());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let conn = Connection::new(socket, parser.clone(), tx.clone());
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod framer;
pub mod parser;
pub mod response;
pub mod writer;
