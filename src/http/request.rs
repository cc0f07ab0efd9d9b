use crate::http::headers::HeaderMap;
use crate::http::parser::{ParseError, SUPPORTED_VERSION, parse_request_line};

/// The start line of a request: `METHOD SP TARGET SP HTTP/1.1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    /// The method token (e.g. "GET")
    pub method: String,
    /// The request target, verbatim (e.g. "/search?q=rust")
    pub target: String,
    /// Version without the `HTTP/` prefix, always "1.1"
    pub version: String,
}

/// Progress of a [`Request`] through the incremental parser.
///
/// States only move forward. `Done` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Waiting for a complete request line
    Init,
    /// Consuming field lines until the empty line
    ParsingHeaders,
    /// Accumulating `Content-Length` body bytes
    ParsingBody,
    /// Request fully parsed
    Done,
    /// A parse failure occurred; nothing further is consumed
    Error,
}

/// A request being parsed, or fully parsed once [`Request::is_done`] holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    state: ParserState,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    pub fn new() -> Self {
        Self {
            request_line: RequestLine::default(),
            headers: HeaderMap::new(),
            body: Vec::new(),
            state: ParserState::Init,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// True once parsing has finished, successfully or not.
    pub fn is_done(&self) -> bool {
        matches!(self.state, ParserState::Done | ParserState::Error)
    }

    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Parses the Content-Length header as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    pub fn has_body(&self) -> bool {
        self.content_length() > 0
    }

    /// Feeds bytes to the state machine.
    ///
    /// `data` is everything buffered but not yet consumed. Returns how many
    /// bytes from the front of `data` were consumed; the caller must drop
    /// exactly those and offer the rest again together with newly read bytes.
    /// `Ok(0)` on an unfinished request means more input is needed.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        let mut read = 0;

        loop {
            if self.state == ParserState::Error {
                return Err(ParseError::RequestInErrorState);
            }

            let current = &data[read..];
            if current.is_empty() {
                break;
            }

            let n = match self.step(current) {
                Ok(n) => n,
                Err(e) => {
                    self.state = ParserState::Error;
                    return Err(e);
                }
            };

            if n == 0 {
                break;
            }
            read += n;
        }

        Ok(read)
    }

    /// Runs a single transition and reports the bytes it consumed.
    fn step(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParserState::Init => {
                let Some((request_line, n)) = parse_request_line(data)? else {
                    return Ok(0);
                };
                self.request_line = request_line;
                self.state = ParserState::ParsingHeaders;
                Ok(n)
            }

            ParserState::ParsingHeaders => {
                let (n, complete) = self.headers.parse(data)?;
                if complete {
                    self.state = if self.has_body() {
                        ParserState::ParsingBody
                    } else {
                        ParserState::Done
                    };
                }
                Ok(n)
            }

            ParserState::ParsingBody => {
                let length = self.content_length();
                let remaining = (length - self.body.len()).min(data.len());
                self.body.extend_from_slice(&data[..remaining]);
                if self.body.len() == length {
                    self.state = ParserState::Done;
                }
                Ok(remaining)
            }

            ParserState::Done => Ok(0),

            ParserState::Error => Err(ParseError::RequestInErrorState),
        }
    }
}

/// Builder for constructing already-parsed requests, mostly for handlers under test.
pub struct RequestBuilder {
    method: Option<String>,
    target: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets the body and a matching Content-Length.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self.headers
            .replace("Content-Length", &self.body.len().to_string());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            request_line: RequestLine {
                method: self.method.ok_or("method missing")?,
                target: self.target.ok_or("target missing")?,
                version: SUPPORTED_VERSION.to_string(),
            },
            headers: self.headers,
            body: self.body,
            state: ParserState::Done,
        })
    }
}
