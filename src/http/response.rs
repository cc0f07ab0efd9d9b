use thiserror::Error;

use crate::http::headers::HeaderMap;

/// HTTP status codes supported by the server.
///
/// The set is closed:
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): Resource not found
/// - `InternalServerError` (500): Server error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use rawhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = ResponseError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(StatusCode::Ok),
            400 => Ok(StatusCode::BadRequest),
            404 => Ok(StatusCode::NotFound),
            500 => Ok(StatusCode::InternalServerError),
            other => Err(ResponseError::UnknownStatus(other)),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("unknown status code {0}")]
    UnknownStatus(u16),
}

/// A failure a handler reports instead of writing a response itself.
///
/// The connection turns it into `status` + default headers + `message` body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("handler failed with {status:?}: {message}")]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Default header set for a fixed body of `content_length` bytes.
///
/// `Content-Length`, `Connection: close` and `Content-Type: text/plain`.
/// Callers may replace any of them before serializing.
pub fn default_headers(content_length: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.set("Content-Length", &content_length.to_string());
    headers.set("Connection", "close");
    headers.set("Content-Type", "text/plain");
    headers
}

/// How a response body is framed on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Announced with `Content-Length`
    Fixed(Vec<u8>),
    /// Announced with `Transfer-Encoding: chunked`, one record per entry
    Chunked(Vec<Vec<u8>>),
}

impl Body {
    pub fn is_chunked(&self) -> bool {
        matches!(self, Body::Chunked(_))
    }
}

/// A complete HTTP response ready to be serialized.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Outgoing headers
    pub headers: HeaderMap,
    /// Response body and its framing
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body(b"<h1>hi</h1>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
    body: Body,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Body::Fixed(Vec::new()),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.replace(name, value);
        self
    }

    /// Sets a fixed-length body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Body::Fixed(body.into());
        self
    }

    /// Switches to chunked framing and appends one chunk.
    ///
    /// Empty chunks are skipped; the terminating record is written by the serializer.
    pub fn chunk(mut self, chunk: impl Into<Vec<u8>>) -> Self {
        let chunk = chunk.into();
        let mut chunks = match std::mem::replace(&mut self.body, Body::Chunked(Vec::new())) {
            Body::Chunked(chunks) => chunks,
            Body::Fixed(_) => Vec::new(),
        };
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        self.body = Body::Chunked(chunks);
        self
    }

    /// Builds the final Response on top of [`default_headers`].
    ///
    /// Fixed bodies get a Content-Length matching the body. Chunked bodies
    /// drop Content-Length and carry `Transfer-Encoding: chunked`.
    pub fn build(self) -> Response {
        let mut headers = match &self.body {
            Body::Fixed(body) => default_headers(body.len()),
            Body::Chunked(_) => {
                let mut headers = default_headers(0);
                headers.remove("Content-Length");
                headers.replace("Transfer-Encoding", "chunked");
                headers
            }
        };

        for (name, value) in self.headers.iter() {
            headers.replace(name, value);
        }

        if let Body::Fixed(body) = &self.body {
            headers.replace("Content-Length", &body.len().to_string());
        }

        Response {
            status: self.status,
            headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    /// Creates the fixed 400 answer for unparseable requests.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest).build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .body(b"404 Not Found".to_vec())
            .build()
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError)
            .body(b"500 Internal Server Error".to_vec())
            .build()
    }
}

impl From<HandlerError> for Response {
    fn from(err: HandlerError) -> Self {
        ResponseBuilder::new(err.status)
            .body(err.message.into_bytes())
            .build()
    }
}
