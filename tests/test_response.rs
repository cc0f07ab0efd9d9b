use rawhttp::http::response::{
    Body, HandlerError, Response, ResponseBuilder, ResponseError, StatusCode, default_headers,
};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_status_code_from_u16() {
    assert_eq!(StatusCode::try_from(200u16), Ok(StatusCode::Ok));
    assert_eq!(StatusCode::try_from(404u16), Ok(StatusCode::NotFound));
    assert_eq!(
        StatusCode::try_from(201u16),
        Err(ResponseError::UnknownStatus(201))
    );
    assert_eq!(
        StatusCode::try_from(418u16),
        Err(ResponseError::UnknownStatus(418))
    );
}

#[test]
fn test_default_headers() {
    let headers = default_headers(42);

    assert_eq!(headers.len(), 3);
    assert_eq!(headers.get("Content-Length"), Some("42"));
    assert_eq!(headers.get("Connection"), Some("close"));
    assert_eq!(headers.get("Content-Type"), Some("text/plain"));
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, Body::Fixed(b"Hello, World!".to_vec()));
    assert_eq!(response.headers.get("Content-Length"), Some("13"));
}

#[test]
fn test_response_builder_overrides_defaults() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .header("X-Custom", "value")
        .body(b"<p>hi</p>".to_vec())
        .build();

    assert_eq!(response.headers.get("content-type"), Some("text/html"));
    assert_eq!(response.headers.get("x-custom"), Some("value"));
    assert_eq!(response.headers.get("connection"), Some("close"));
    assert_eq!(response.headers.len(), 4);
}

#[test]
fn test_response_builder_content_length_tracks_body() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Length"), Some("4"));
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert_eq!(response.body, Body::Fixed(Vec::new()));
    assert_eq!(response.headers.get("Content-Length"), Some("0"));
}

#[test]
fn test_response_builder_chunked() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .chunk("abc")
        .chunk("")
        .chunk("defg")
        .build();

    assert!(response.body.is_chunked());
    assert_eq!(
        response.body,
        Body::Chunked(vec![b"abc".to_vec(), b"defg".to_vec()])
    );
    assert_eq!(response.headers.get("Transfer-Encoding"), Some("chunked"));
    assert!(!response.headers.contains("Content-Length"));
}

#[test]
fn test_response_ok_helper() {
    let response = Response::ok(b"test content".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, Body::Fixed(b"test content".to_vec()));
}

#[test]
fn test_response_bad_request_helper() {
    let response = Response::bad_request();

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.body, Body::Fixed(Vec::new()));
    assert_eq!(response.headers.get("Content-Length"), Some("0"));
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, Body::Fixed(b"404 Not Found".to_vec()));
}

#[test]
fn test_response_internal_error_helper() {
    let response = Response::internal_error();

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(
        response.body,
        Body::Fixed(b"500 Internal Server Error".to_vec())
    );
}

#[test]
fn test_response_from_handler_error() {
    let err = HandlerError::new(StatusCode::NotFound, "no such thing");
    let response = Response::from(err);

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, Body::Fixed(b"no such thing".to_vec()));
    assert_eq!(response.headers.get("Content-Length"), Some("13"));
    assert_eq!(response.headers.get("Content-Type"), Some("text/plain"));
}
