//! Static file serving module
//!
//! Resolves request paths against the configured content root, serves file
//! bytes, index files, and directory-listing pages.

use crate::config::ContentConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use html_escape::{encode_double_quoted_attribute, encode_text};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::fmt::Write as FmtWrite;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Serve the request path from the content root
pub async fn serve_path(ctx: &RequestContext<'_>, content: &ContentConfig) -> Response<Full<Bytes>> {
    let Some(relative) = normalize_path(ctx.path) else {
        logger::log_warning(&format!("Rejected request path: {}", ctx.path));
        return http::build_404_response();
    };

    let root = Path::new(&content.root_dir);
    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_error(&format!(
                "Content root '{}' not accessible: {e}",
                content.root_dir
            ));
            return http::build_500_response();
        }
    };

    let requested = root.join(&relative);

    // Canonicalization both resolves symlinks and distinguishes "missing"
    // from "unreadable"
    let resolved = match requested.canonicalize() {
        Ok(p) => p,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return http::build_404_response();
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to resolve '{}': {e}",
                requested.display()
            ));
            return http::build_500_response();
        }
    };

    if !resolved.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            ctx.path,
            resolved.display()
        ));
        return http::build_404_response();
    }

    if resolved.is_dir() {
        serve_directory(ctx, &resolved, &content.index_files).await
    } else {
        serve_file(ctx, &resolved).await
    }
}

/// Percent-decode and normalize a request path to a root-relative `PathBuf`.
///
/// Returns `None` for paths that are not valid UTF-8 after decoding or that
/// contain parent/prefix components.
pub fn normalize_path(path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;

    let mut normalized = PathBuf::new();
    for component in Path::new(decoded.trim_matches('/')).components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(segment) => normalized.push(segment),
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }

    Some(normalized)
}

/// Serve a regular file's bytes
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            http::response::build_file_response(Bytes::from(content), content_type, ctx.is_head)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_500_response()
        }
    }
}

/// Serve a directory: an index file if one exists, otherwise a listing page
async fn serve_directory(
    ctx: &RequestContext<'_>,
    dir: &Path,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    for index_file in index_files {
        let index_path = dir.join(index_file);
        if index_path.is_file() {
            return serve_file(ctx, &index_path).await;
        }
    }

    match render_listing(ctx.path, dir).await {
        Ok(html) => http::response::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list directory '{}': {e}", dir.display()));
            http::build_500_response()
        }
    }
}

/// Render an HTML directory-listing page.
///
/// Entries are sorted case-insensitively; directories get a trailing slash.
/// Links are absolute so they work whether or not the request path carried
/// a trailing slash.
async fn render_listing(request_path: &str, dir: &Path) -> std::io::Result<String> {
    let mut entries = fs::read_dir(dir).await?;
    let mut items: Vec<(String, bool)> = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let is_dir = entry.file_type().await?.is_dir();
        let name = entry.file_name().to_string_lossy().into_owned();
        items.push((name, is_dir));
    }

    items.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

    let base = request_path.trim_end_matches('/');
    let title = if base.is_empty() { "/" } else { request_path };

    let mut body = String::from("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    let _ = write!(body, "<title>Directory listing for {}</title>", encode_text(title));
    body.push_str("</head><body>");
    let _ = write!(body, "<h1>Directory listing for {}</h1><hr><ul>", encode_text(title));

    for (name, is_dir) in items {
        let suffix = if is_dir { "/" } else { "" };
        let _ = write!(
            body,
            "<li><a href=\"{base}/{href}{suffix}\">{display}{suffix}</a></li>",
            href = encode_double_quoted_attribute(&name),
            display = encode_text(&name),
        );
    }

    body.push_str("</ul><hr></body></html>");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain_paths() {
        assert_eq!(normalize_path("/"), Some(PathBuf::new()));
        assert_eq!(normalize_path("/index.html"), Some(PathBuf::from("index.html")));
        assert_eq!(normalize_path("/a/b/c.js"), Some(PathBuf::from("a/b/c.js")));
    }

    #[test]
    fn test_normalize_percent_decoding() {
        assert_eq!(
            normalize_path("/hello%20world.txt"),
            Some(PathBuf::from("hello world.txt"))
        );
    }

    #[test]
    fn test_normalize_rejects_parent_components() {
        assert_eq!(normalize_path("/../etc/passwd"), None);
        assert_eq!(normalize_path("/a/../../b"), None);
        assert_eq!(normalize_path("/%2e%2e/secret"), None);
    }

    #[test]
    fn test_normalize_drops_current_dir_components() {
        assert_eq!(normalize_path("/./a/./b"), Some(PathBuf::from("a/b")));
    }

    #[tokio::test]
    async fn test_render_listing_sorts_and_escapes() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join("Zed.txt"), b"z").expect("write");
        std::fs::write(tmp.path().join("apple.txt"), b"a").expect("write");
        std::fs::create_dir(tmp.path().join("sub")).expect("mkdir");

        let html = render_listing("/files", tmp.path()).await.expect("listing");
        let apple = html.find("apple.txt").expect("apple listed");
        let sub = html.find("sub/").expect("dir listed with slash");
        let zed = html.find("Zed.txt").expect("zed listed");
        assert!(apple < sub && sub < zed, "entries sorted case-insensitively");
        assert!(html.contains("href=\"/files/apple.txt\""));
    }
}
