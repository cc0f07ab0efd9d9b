use std::sync::Arc;

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, trace, warn};

use crate::http::parser::ParseError;
use crate::http::request::Request;
use crate::http::response::{HandlerError, Response};
use crate::http::writer::ResponseWriter;

/// Read buffer capacity used when none is configured.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Produces the response for one parsed request.
///
/// A handler either writes a complete response (status line, headers, body)
/// into the writer and returns `Ok`, or returns a [`HandlerError`], in which
/// case anything it wrote is discarded and a minimal error response is sent.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, w: &mut ResponseWriter, req: &Request) -> Result<(), HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&mut ResponseWriter, &Request) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn handle(&self, w: &mut ResponseWriter, req: &Request) -> Result<(), HandlerError> {
        self(w, req)
    }
}

/// Handler shared by every connection task.
pub type SharedHandler = Arc<dyn Handler>;

/// Why reading a request failed.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("stream closed after {received} bytes, before the request was complete")]
    UnexpectedEof { received: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    capacity: usize,
    received: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps `stream` with a read buffer that never holds more than `capacity` bytes.
    pub fn new(stream: S, capacity: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(capacity),
            capacity,
            received: 0,
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request and closes the stream.
    pub async fn run(&mut self, handler: &dyn Handler) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    Ok(None) => {
                        debug!("Peer closed without sending a request");
                    }
                    Err(RequestError::Io(e)) => {
                        return Err(e.into());
                    }
                    Err(e) => {
                        warn!(error = %e, "Rejecting malformed request");
                        let mut writer = ResponseWriter::new();
                        writer.write_response(&Response::bad_request());
                        self.state = ConnectionState::Writing(writer);
                    }
                },

                ConnectionState::Processing(req) => {
                    let writer = Self::handle_request(handler, &req);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown after response failed");
        }

        Ok(())
    }

    /// Reads until one request is fully parsed.
    ///
    /// Returns `Ok(None)` if the peer closed the stream before sending a
    /// single byte. No read timeout applies: a request whose body never
    /// fully arrives waits as long as the peer keeps the stream open.
    pub async fn read_request(&mut self) -> Result<Option<Request>, RequestError> {
        let mut request = Request::new();

        while !request.is_done() {
            let free = self.capacity.saturating_sub(self.buffer.len());
            if free == 0 {
                return Err(ParseError::RequestTooLarge {
                    capacity: self.capacity,
                }
                .into());
            }

            // Reclaims the space of consumed bytes before reading into the tail.
            self.buffer.reserve(free);
            let n = (&mut self.stream)
                .take(free as u64)
                .read_buf(&mut self.buffer)
                .await?;

            if n == 0 {
                if self.received == 0 {
                    return Ok(None);
                }
                return Err(RequestError::UnexpectedEof {
                    received: self.received,
                });
            }
            self.received += n;

            let consumed = request.parse(&self.buffer)?;
            self.buffer.advance(consumed);

            trace!(
                read = n,
                consumed,
                buffered = self.buffer.len(),
                state = ?request.state(),
                "Fed request parser"
            );
        }

        if !self.buffer.is_empty() {
            debug!(
                trailing = self.buffer.len(),
                "Ignoring bytes after the request"
            );
        }

        Ok(Some(request))
    }

    fn handle_request(handler: &dyn Handler, req: &Request) -> ResponseWriter {
        info!(
            method = %req.request_line.method,
            target = %req.request_line.target,
            body = req.body.len(),
            "Handling request"
        );

        let mut writer = ResponseWriter::new();
        match handler.handle(&mut writer, req) {
            Ok(()) if writer.is_empty() => {
                warn!("Handler wrote no response");
                writer.write_response(&Response::internal_error());
            }
            Ok(()) => {}
            Err(e) => {
                debug!(status = e.status.as_u16(), error = %e, "Handler returned an error");
                writer.clear();
                writer.write_response(&Response::from(e));
            }
        }
        writer
    }
}
