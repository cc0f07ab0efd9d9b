use thiserror::Error;

use crate::http::headers::is_token;
use crate::http::request::RequestLine;

/// Line terminator used throughout HTTP/1.1.
pub const CRLF: &[u8] = b"\r\n";

/// The only protocol version this server speaks.
pub const SUPPORTED_VERSION: &str = "1.1";

/// Errors raised while turning raw bytes into a [`Request`](crate::http::request::Request).
///
/// Every variant except `RequestInErrorState` moves the request into the
/// terminal error state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("bad request line")]
    BadRequestLine,

    #[error("unsupported http version")]
    UnsupportedVersion,

    #[error("bad field line")]
    BadFieldLine,

    #[error("bad field name")]
    BadFieldName,

    #[error("bad header name")]
    BadHeaderName,

    #[error("request in error state")]
    RequestInErrorState,

    #[error("request does not fit in a {capacity} byte read buffer")]
    RequestTooLarge { capacity: usize },
}

/// Parses the start line at the front of `buf`.
///
/// Returns `Ok(None)` when no CRLF has arrived yet. On success the byte count
/// includes the trailing CRLF.
pub fn parse_request_line(buf: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(idx) = find_crlf(buf) else {
        return Ok(None);
    };

    let line = &buf[..idx];
    let consumed = idx + CRLF.len();

    let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
    let [method, target, version_token] = parts.as_slice() else {
        return Err(ParseError::BadRequestLine);
    };

    if !is_token(method) || target.is_empty() {
        return Err(ParseError::BadRequestLine);
    }

    let version = parse_version_token(version_token)?;
    if version != SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedVersion);
    }

    let method = std::str::from_utf8(method).map_err(|_| ParseError::BadRequestLine)?;
    let target = std::str::from_utf8(target).map_err(|_| ParseError::BadRequestLine)?;

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    };

    Ok(Some((request_line, consumed)))
}

/// Splits `HTTP/<major>.<minor>` and returns the `<major>.<minor>` part.
fn parse_version_token(token: &[u8]) -> Result<&str, ParseError> {
    let mut halves = token.split(|&b| b == b'/');
    let (Some(b"HTTP"), Some(version), None) = (halves.next(), halves.next(), halves.next())
    else {
        return Err(ParseError::BadRequestLine);
    };

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            // Three ascii bytes, always valid utf-8.
            std::str::from_utf8(version).map_err(|_| ParseError::BadRequestLine)
        }
        _ => Err(ParseError::BadRequestLine),
    }
}

pub(crate) fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}
