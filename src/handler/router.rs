//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, static file
//! dispatch, the demo header override, and access logging.

use crate::config::AppState;
use crate::handler::{finalize, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling.
///
/// Per-request failures are turned into HTTP status codes here; the service
/// itself is infallible so a bad request can never tear down the serve loop.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let ctx = RequestContext {
        path: &path,
        is_head,
    };

    let mut response = match method {
        Method::GET | Method::HEAD => {
            static_files::serve_path(&ctx, &state.config.content).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    // Demo contract: every response reports text/html, and the root path
    // additionally advertises Brotli encoding
    finalize::apply_demo_headers(&path, &mut response);

    if state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed)
    {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.clone(),
        );
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}
