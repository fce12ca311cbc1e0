//! Static file serving module
//!
//! Resolves request paths against the serving root and streams whole files
//! or validated byte ranges from disk.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use futures::TryStreamExt;
use http_body_util::{BodyExt, StreamBody};
use hyper::body::Frame;
use hyper::Response;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::http::{self, mime, RangeError, ResponseBody};
use crate::logger;

/// Chunk size for streamed file bodies
const CHUNK_SIZE: usize = 8192;

/// Serve a file from the root directory, honoring an optional Range header
///
/// `root` must be canonicalized; request paths are resolved against it and
/// anything escaping it is treated as missing.
pub async fn serve(
    root: &Path,
    uri_path: &str,
    range_header: Option<&str>,
) -> Response<ResponseBody> {
    let Some(file_path) = resolve_path(root, uri_path) else {
        return http::build_404_response();
    };

    let metadata = match fs::metadata(&file_path).await {
        Ok(m) => m,
        Err(e) => {
            logger::log_error(&format!("Failed to stat '{}': {}", file_path.display(), e));
            return http::build_500_response();
        }
    };
    if metadata.is_dir() {
        return http::build_404_response();
    }

    match range_header {
        Some(header) => serve_range(&file_path, header, metadata.len()).await,
        None => serve_whole(&file_path, metadata.len()).await,
    }
}

/// Resolve a request path to an existing file inside the serving root
///
/// Returns `None` when the target does not exist or when the canonicalized
/// path escapes the root (symlink or traversal).
fn resolve_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    // Remove leading slash and prevent directory traversal
    let clean_path = uri_path.trim_start_matches('/').replace("..", "");
    let file_path = root.join(clean_path);

    // File not found is common (404), no need to log at warning level
    let canonical = file_path.canonicalize().ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            uri_path,
            canonical.display()
        ));
        return None;
    }

    Some(canonical)
}

/// Stream the whole file as a 200 response
async fn serve_whole(file_path: &Path, file_size: u64) -> Response<ResponseBody> {
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    match open_stream(file_path, 0, file_size).await {
        Ok(body) => http::build_file_response(body, content_type, file_size),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            http::build_500_response()
        }
    }
}

/// Validate the Range header and stream the requested slice as a 206 response
async fn serve_range(file_path: &Path, header: &str, file_size: u64) -> Response<ResponseBody> {
    let range = match http::parse_range_header(header, file_size) {
        Ok(range) => range,
        Err(RangeError::NotSatisfiable) => return http::build_416_response(file_size),
        Err(
            e @ (RangeError::InvalidHeader | RangeError::InvalidFormat | RangeError::InvalidBound),
        ) => return http::build_400_response(&e.to_string()),
    };

    match open_stream(file_path, range.start, range.content_length()).await {
        Ok(body) => http::build_partial_response(body, range, file_size),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            http::build_500_response()
        }
    }
}

/// Open the file, seek to `start`, and expose `len` bytes as a chunked body
///
/// The handle closes when the body is dropped, including on early client
/// disconnect. A short read ends the stream early without retries.
async fn open_stream(file_path: &Path, start: u64, len: u64) -> std::io::Result<ResponseBody> {
    let mut file = File::open(file_path).await?;
    if start > 0 {
        file.seek(SeekFrom::Start(start)).await?;
    }

    let reader = file.take(len);
    let stream = ReaderStream::with_capacity(reader, CHUNK_SIZE);
    Ok(StreamBody::new(stream.map_ok(Frame::data)).boxed())
}
