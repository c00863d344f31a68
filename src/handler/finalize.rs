//! Demo response finalization hook
//!
//! Applied to every response after the static handler has built it and
//! before it is flushed to the client:
//!
//! - `Content-Type` is forced to `text/html` regardless of the served
//!   file's actual type.
//! - The exact path `/` additionally gets `Content-Encoding: br`.
//!
//! The demo's index page is shipped pre-compressed with Brotli, so the
//! browser must be told to decode it; no compression happens here. Both
//! overrides are the demo's contract and are intentionally not
//! general-purpose static-serving behavior.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_ENCODING, CONTENT_TYPE};
use hyper::Response;

/// Apply the demo header overrides to a finished response.
///
/// `path` is the original request path, before any normalization.
pub fn apply_demo_headers(path: &str, response: &mut Response<Full<Bytes>>) {
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));

    if path == "/" {
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("br"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http;

    #[test]
    fn test_content_type_forced_to_html() {
        let mut resp = http::response::build_file_response(
            Bytes::from_static(b"body {}"),
            "text/css",
            false,
        );
        apply_demo_headers("/style.css", &mut resp);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert!(resp.headers().get(CONTENT_ENCODING).is_none());
    }

    #[test]
    fn test_root_path_advertises_brotli() {
        let mut resp = http::response::build_html_response("<h1>Hi</h1>".to_string(), false);
        apply_demo_headers("/", &mut resp);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(resp.headers()[CONTENT_ENCODING], "br");
    }

    #[test]
    fn test_non_root_path_never_gets_encoding() {
        let mut resp = http::build_404_response();
        apply_demo_headers("/index.html", &mut resp);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert!(resp.headers().get(CONTENT_ENCODING).is_none());
    }

    #[test]
    fn test_error_responses_also_overridden() {
        let mut resp = http::build_404_response();
        apply_demo_headers("/", &mut resp);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(resp.headers()[CONTENT_ENCODING], "br");
    }
}
