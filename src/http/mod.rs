//! HTTP/1.1 protocol implementation over raw byte streams.
//!
//! # Architecture
//!
//! - **`headers`**: case-insensitive header map and field-line parsing
//! - **`parser`**: request-line parsing and the parse error taxonomy
//! - **`request`**: the incremental request state machine
//! - **`response`**: status codes, responses and the default header set
//! - **`writer`**: serializes status line, headers and (chunked) bodies
//! - **`connection`**: drives one stream from raw reads to a written response
//!
//! # Request State Machine
//!
//! Each call to [`Request::parse`](request::Request::parse) consumes as many
//! complete items as the buffer holds and reports the byte count:
//!
//! ```text
//!        ┌─────────────┐
//!        │    Init     │ ← Wait for a full request line
//!        └──────┬──────┘
//!               │ Request line parsed
//!               ▼
//!        ┌──────────────────┐
//!        │  ParsingHeaders  │ ← One field line at a time
//!        └──────┬───────────┘
//!               │ Empty line
//!               ├─ Content-Length > 0 → ParsingBody ─┐
//!               ▼                                    │ Body complete
//!        ┌──────────────────┐                        │
//!        │       Done       │ ◄──────────────────────┘
//!        └──────────────────┘
//!
//!   Any parse failure → Error (terminal)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rawhttp::http::connection::Connection;
//! use rawhttp::http::request::Request;
//! use rawhttp::http::response::Response;
//! use rawhttp::http::writer::ResponseWriter;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:42069").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, 1024);
//!             let handler = |w: &mut ResponseWriter, _req: &Request| {
//!                 w.write_response(&Response::ok("hi"));
//!                 Ok(())
//!             };
//!             if let Err(e) = conn.run(&handler).await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
