//! Logger module
//!
//! Startup banner, per-request access logging, and error diagnostics.
//! Informational output goes to stdout, diagnostics to stderr.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

fn write_info(message: &str) {
    println!("{message}");
}

fn write_error(message: &str) {
    eprintln!("{message}");
}

/// The two startup banner lines: the listening URL and the directory
/// being served.
pub fn log_server_start(port: u16, document_root: &Path) {
    write_info(&format!("Server running at http://localhost:{port}"));
    write_info(&format!("Serving files from: {}", document_root.display()));
}

/// One Common Log Format line per handled request.
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format_common());
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    write_error(&format!("[ERROR] Failed to bind {addr}: {err}"));
}
