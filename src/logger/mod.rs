//! Logger module
//!
//! Console logging for the demo server:
//! - Server lifecycle messages
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info(&format!(
        "Open http://{}:{} and click to start the demo!",
        config.server.host, config.server.port
    ));
    write_info(&format!("Serving '{}' on {addr}", config.content.root_dir));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
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
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
