//! Demo static file server.
//!
//! Serves files from a configured root directory over HTTP/1.1, forcing
//! `Content-Type: text/html` on every response and advertising
//! `Content-Encoding: br` on the root path so the browser decodes the
//! pre-compressed demo bundle.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
