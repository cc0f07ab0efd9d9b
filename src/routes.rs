//! Demo routes served by the `rawhttp` binary.

use crate::http::request::Request;
use crate::http::response::{HandlerError, ResponseBuilder, StatusCode, default_headers};
use crate::http::writer::ResponseWriter;

/// Upper bound on chunks produced by `/stream/<n>`.
pub const MAX_STREAM_CHUNKS: usize = 100;

const PAGE_200: &str = "<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was parsed byte by byte and found acceptable.</p>
  </body>
</html>
";

const PAGE_500: &str = "<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>This one is on the server.</p>
  </body>
</html>
";

/// Dispatches on the request target.
///
/// - `/yourproblem` fails with a 400 [`HandlerError`]
/// - `/myproblem` writes a 500 page
/// - `/echo` returns the request body as text/plain
/// - `/stream/<n>` writes `n` chunks with chunked framing
/// - anything else writes a 200 page
pub fn demo(w: &mut ResponseWriter, req: &Request) -> Result<(), HandlerError> {
    let target = req.request_line.target.as_str();

    match target {
        "/yourproblem" => Err(HandlerError::new(
            StatusCode::BadRequest,
            "Your request honestly kinda sucked.\n",
        )),
        "/myproblem" => {
            write_html(w, StatusCode::InternalServerError, PAGE_500);
            Ok(())
        }
        "/echo" => {
            let response = ResponseBuilder::new(StatusCode::Ok)
                .body(req.body.clone())
                .build();
            w.write_response(&response);
            Ok(())
        }
        _ => match target.strip_prefix("/stream/") {
            Some(count) => write_stream(w, count),
            None => {
                write_html(w, StatusCode::Ok, PAGE_200);
                Ok(())
            }
        },
    }
}

fn write_html(w: &mut ResponseWriter, status: StatusCode, page: &str) {
    let mut headers = default_headers(page.len());
    headers.replace("Content-Type", "text/html");

    w.write_status_line(status);
    w.write_headers(&headers);
    w.write_body(page.as_bytes());
}

fn write_stream(w: &mut ResponseWriter, count: &str) -> Result<(), HandlerError> {
    let count: usize = count.parse().map_err(|_| {
        HandlerError::new(
            StatusCode::BadRequest,
            format!("chunk count must be a number, got {count:?}\n"),
        )
    })?;
    let count = count.min(MAX_STREAM_CHUNKS);

    let mut headers = default_headers(0);
    headers.remove("Content-Length");
    headers.set("Transfer-Encoding", "chunked");

    w.write_status_line(StatusCode::Ok);
    w.write_headers(&headers);
    for i in 0..count {
        w.write_chunk(format!("chunk {i}\n").as_bytes());
    }
    w.write_chunked_done();

    Ok(())
}
