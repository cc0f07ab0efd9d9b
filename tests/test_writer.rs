use rawhttp::http::headers::HeaderMap;
use rawhttp::http::response::{ResponseBuilder, ResponseError, StatusCode, default_headers};
use rawhttp::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_writer_status_lines() {
    let cases = [
        (StatusCode::Ok, "HTTP/1.1 200 OK\r\n"),
        (StatusCode::BadRequest, "HTTP/1.1 400 Bad Request\r\n"),
        (StatusCode::NotFound, "HTTP/1.1 404 Not Found\r\n"),
        (
            StatusCode::InternalServerError,
            "HTTP/1.1 500 Internal Server Error\r\n",
        ),
    ];

    for (status, expected) in cases {
        let mut w = ResponseWriter::new();
        w.write_status_line(status);
        assert_eq!(w.as_bytes(), expected.as_bytes());
    }
}

#[test]
fn test_writer_unknown_status() {
    let mut w = ResponseWriter::new();

    assert_eq!(w.write_status(302), Err(ResponseError::UnknownStatus(302)));
    assert!(w.is_empty());

    w.write_status(404).unwrap();
    assert_eq!(w.as_bytes(), b"HTTP/1.1 404 Not Found\r\n");
}

#[test]
fn test_writer_fixed_body_round_trip() {
    let mut headers = HeaderMap::new();
    headers.set("Content-Length", "5");

    let mut w = ResponseWriter::new();
    w.write_status_line(StatusCode::Ok);
    w.write_headers(&headers);
    w.write_body(b"hello");

    assert_eq!(
        w.as_bytes(),
        b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello"
    );
}

#[test]
fn test_writer_empty_header_block() {
    let mut w = ResponseWriter::new();
    w.write_headers(&HeaderMap::new());

    assert_eq!(w.as_bytes(), b"\r\n");
}

#[test]
fn test_writer_default_headers_block() {
    let mut w = ResponseWriter::new();
    w.write_headers(&default_headers(0));

    let text = String::from_utf8(w.as_bytes().to_vec()).unwrap();
    let mut lines: Vec<&str> = text.split("\r\n").collect();

    assert_eq!(lines.pop(), Some(""));
    assert_eq!(lines.pop(), Some(""));
    lines.sort();
    assert_eq!(
        lines,
        vec!["Connection: close", "Content-Length: 0", "Content-Type: text/plain"]
    );
}

#[test]
fn test_writer_chunks_then_terminator() {
    let mut w = ResponseWriter::new();
    w.write_chunk(b"abc");
    w.write_chunk(b"");

    assert_eq!(w.as_bytes(), b"3\r\nabc\r\n0\r\n\r\n");
}

#[test]
fn test_writer_chunk_length_is_hex() {
    let mut w = ResponseWriter::new();
    w.write_chunk(&[b'x'; 26]);
    w.write_chunked_done();

    let mut expected = b"1a\r\n".to_vec();
    expected.extend_from_slice(&[b'x'; 26]);
    expected.extend_from_slice(b"\r\n0\r\n\r\n");
    assert_eq!(w.as_bytes(), expected.as_slice());
}

#[test]
fn test_writer_serializes_chunked_response() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "close")
        .chunk("abc")
        .chunk("hello world")
        .build();

    let bytes = serialize_response(&response);
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Transfer-Encoding: chunked\r\n"));
    assert!(!text.contains("Content-Length"));
    assert!(text.ends_with("\r\n\r\n3\r\nabc\r\nb\r\nhello world\r\n0\r\n\r\n"));
}

#[test]
fn test_writer_serializes_fixed_response() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .body("gone")
        .build();

    let text = String::from_utf8(serialize_response(&response)).unwrap();

    assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(text.contains("Content-Length: 4\r\n"));
    assert!(text.ends_with("\r\n\r\ngone"));
}

#[test]
fn test_writer_clear() {
    let mut w = ResponseWriter::new();
    w.write_body(b"partial");
    w.clear();

    assert!(w.is_empty());
}

#[tokio::test]
async fn test_writer_flushes_to_stream() {
    let mut w = ResponseWriter::new();
    w.write_status_line(StatusCode::Ok);
    w.write_headers(&HeaderMap::new());
    w.write_body(b"done");

    let mut out: Vec<u8> = Vec::new();
    w.write_to_stream(&mut out).await.unwrap();

    assert_eq!(out, b"HTTP/1.1 200 OK\r\n\r\ndone");
}
