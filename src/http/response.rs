//! HTTP response building module
//!
//! Builders for every status code the server emits, all over one boxed body
//! type so file responses can stream while error responses stay in memory.

use std::io;

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::Response;

use crate::http::range::ByteRange;

/// Unified response body: streamed file content or a small in-memory blob.
pub type ResponseBody = BoxBody<Bytes, io::Error>;

/// Wrap an in-memory blob as a [`ResponseBody`].
pub fn full_body<T: Into<Bytes>>(data: T) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Build 200 OK response for a whole file
///
/// `Content-Length` is set explicitly because the streamed body carries no
/// size hint of its own.
pub fn build_file_response(
    body: ResponseBody,
    content_type: &str,
    file_size: u64,
) -> Response<ResponseBody> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", file_size)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(full_body(Bytes::new()))
        })
}

/// Build 206 Partial Content response for a validated range
pub fn build_partial_response(
    body: ResponseBody,
    range: ByteRange,
    file_size: u64,
) -> Response<ResponseBody> {
    let ByteRange { start, end } = range;

    Response::builder()
        .status(206)
        .header("Content-Type", "application/octet-stream")
        .header("Content-Length", range.content_length())
        .header("Content-Range", format!("bytes {start}-{end}/{file_size}"))
        .header("Accept-Ranges", "bytes")
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(full_body(Bytes::new()))
        })
}

/// Build 400 Bad Request response with an explanatory message
pub fn build_400_response(message: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(400)
        .header("Content-Type", "text/plain")
        .header("Content-Length", message.len())
        .body(full_body(message.to_owned()))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(full_body("400 Bad Request"))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    const BODY: &str = "404 Not Found";

    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BODY.len())
        .body(full_body(BODY))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(full_body(BODY))
        })
}

/// Build 405 Method Not Allowed response (only GET is served)
pub fn build_405_response() -> Response<ResponseBody> {
    const BODY: &str = "405 Method Not Allowed";

    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BODY.len())
        .header("Allow", "GET")
        .body(full_body(BODY))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(full_body(BODY))
        })
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: u64) -> Response<ResponseBody> {
    const BODY: &str = "Range Not Satisfiable";

    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BODY.len())
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(full_body(BODY))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(full_body(BODY))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<ResponseBody> {
    const BODY: &str = "500 Internal Server Error";

    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BODY.len())
        .body(full_body(BODY))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(full_body(BODY))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_response_headers() {
        let resp = build_file_response(full_body(vec![0u8; 16]), "application/octet-stream", 16);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/octet-stream");
        assert_eq!(resp.headers()["Content-Length"], "16");
        assert!(resp.headers().get("Accept-Ranges").is_none());
    }

    #[test]
    fn test_partial_response_headers() {
        let range = ByteRange { start: 0, end: 99 };
        let resp = build_partial_response(full_body(vec![0u8; 100]), range, 1024);
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Type"], "application/octet-stream");
        assert_eq!(resp.headers()["Content-Length"], "100");
        assert_eq!(resp.headers()["Content-Range"], "bytes 0-99/1024");
        assert_eq!(resp.headers()["Accept-Ranges"], "bytes");
    }

    #[test]
    fn test_416_response_reports_file_size() {
        let resp = build_416_response(1024);
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */1024");
    }

    #[test]
    fn test_400_response_carries_message() {
        let resp = build_400_response("invalid range header");
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.headers()["Content-Length"], "20");
    }

    #[test]
    fn test_405_response_advertises_get() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET");
    }

    #[test]
    fn test_404_response() {
        assert_eq!(build_404_response().status(), 404);
    }

    #[test]
    fn test_500_response() {
        assert_eq!(build_500_response().status(), 500);
    }
}
