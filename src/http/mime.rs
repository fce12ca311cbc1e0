//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension. Database
//! files and anything unrecognized fall back to `application/octet-stream`.

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use dbserve::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("json")), "application/json");
/// assert_eq!(get_content_type(Some("db")), "application/octet-stream");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("css") => "text/css",

        // Data
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",

        // Archives
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",
        Some("tar") => "application/x-tar",

        // Default, including db/sqlite/duckdb blobs
        _ => "application/octet-stream",
    }
}
