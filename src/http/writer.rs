use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::HeaderMap;
use crate::http::parser::{CRLF, SUPPORTED_VERSION};
use crate::http::response::{Body, Response, ResponseError, StatusCode};

/// Chunked body terminator: a zero-length chunk with no trailers.
pub const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

/// Serializes a complete response into its wire bytes.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut writer = ResponseWriter::new();
    writer.write_response(resp);
    writer.buffer
}

/// Builds response bytes piece by piece and then flushes them to a stream.
///
/// Nothing here enforces ordering or framing: callers choosing chunked
/// output must set `Transfer-Encoding: chunked`, leave out `Content-Length`
/// and finish with [`write_chunked_done`](Self::write_chunked_done).
#[derive(Debug, Default)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `HTTP/1.1 <code> <reason>\r\n`.
    pub fn write_status_line(&mut self, status: StatusCode) {
        let status_line = format!(
            "HTTP/{} {} {}\r\n",
            SUPPORTED_VERSION,
            status.as_u16(),
            status.reason_phrase()
        );
        self.buffer.extend_from_slice(status_line.as_bytes());
    }

    /// Like [`write_status_line`](Self::write_status_line) for a raw numeric code.
    pub fn write_status(&mut self, code: u16) -> Result<(), ResponseError> {
        let status = StatusCode::try_from(code)?;
        self.write_status_line(status);
        Ok(())
    }

    /// Writes one `Name: Value\r\n` line per header, then the empty line.
    pub fn write_headers(&mut self, headers: &HeaderMap) {
        headers.for_each(|name, value| {
            self.buffer.extend_from_slice(name.as_bytes());
            self.buffer.extend_from_slice(b": ");
            self.buffer.extend_from_slice(value.as_bytes());
            self.buffer.extend_from_slice(CRLF);
        });
        self.buffer.extend_from_slice(CRLF);
    }

    /// Writes raw bytes verbatim.
    pub fn write_body(&mut self, body: &[u8]) {
        self.buffer.extend_from_slice(body);
    }

    /// Writes one `<hex-len>\r\n<bytes>\r\n` record.
    ///
    /// An empty chunk is the end of the body and writes the terminator.
    pub fn write_chunk(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            self.write_chunked_done();
            return;
        }
        self.buffer
            .extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        self.buffer.extend_from_slice(chunk);
        self.buffer.extend_from_slice(CRLF);
    }

    pub fn write_chunked_done(&mut self) {
        self.buffer.extend_from_slice(LAST_CHUNK);
    }

    /// Writes status line, headers and body of a prepared [`Response`].
    pub fn write_response(&mut self, resp: &Response) {
        self.write_status_line(resp.status);
        self.write_headers(&resp.headers);

        match &resp.body {
            Body::Fixed(body) => self.write_body(body),
            Body::Chunked(chunks) => {
                for chunk in chunks.iter().filter(|c| !c.is_empty()) {
                    self.write_chunk(chunk);
                }
                self.write_chunked_done();
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops everything written so far.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.written = 0;
    }

    /// Flushes the buffered bytes to `stream`, resuming where a previous call stopped.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
