//! Request handler module
//!
//! Entry point for HTTP request processing: method validation, file serving
//! dispatch, and access logging.

pub mod static_files;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// Only GET is served; every other method receives a 405 with `Allow: GET`.
/// The handler never fails the connection, so the error type is
/// [`Infallible`].
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = version_str(req.version());

    let range_header = header_value(&req, "range");
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let response = if method == Method::GET {
        static_files::serve(&state.root, uri.path(), range_header.as_deref()).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version;
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.referer = referer;
        entry.user_agent = user_agent;
        logger::log_access(&entry);
    }

    Ok(response)
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_str(version: hyper::Version) -> String {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string()
}

/// Read back the Content-Length the response builders set
fn content_length_of(response: &Response<ResponseBody>) -> u64 {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
