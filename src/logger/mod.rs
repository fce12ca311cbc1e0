//! Logger module
//!
//! Console logging for the development server:
//! - Server lifecycle messages on stdout
//! - Access logging in combined format
//! - Error and warning logging on stderr

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

/// Write to info/access log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    write_info("======================================");
    write_info("Database fixture server started");
    write_info(&format!("Serving directory: {}", root.display()));
    write_info(&format!("Listening on: http://{addr}"));
    write_info("Press Ctrl+C to stop");
    write_info("======================================\n");
}

pub fn log_shutdown() {
    write_info("\nServer stopped");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format_combined());
}
