//! Static file serving module
//!
//! Resolves request paths against the document root and builds file,
//! index, and directory listing responses.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, conditional};
use crate::logger;

/// Outcome of resolving a request path against the document root
#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
    /// Directory requested without the trailing slash
    RedirectToSlash,
    NotFound,
}

/// Serve a request for `ctx.path` from the document root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve(ctx.path, &state.root) {
        Resolved::File(path) => serve_file(ctx, state, &path).await,
        Resolved::Directory(path) => serve_directory(ctx, state, &path).await,
        Resolved::RedirectToSlash => http::build_redirect_response(&format!("{}/", ctx.path)),
        Resolved::NotFound => http::build_404_response(),
    }
}

/// Resolve a percent-encoded URL path to a filesystem path under `root`
///
/// Canonicalizes the joined path and requires it to stay inside the
/// canonical root, which rejects `..` escapes and symlinks pointing
/// outside the served tree.
fn resolve(url_path: &str, root: &Path) -> Resolved {
    let decoded = percent_decode_str(url_path).decode_utf8_lossy();
    let trailing_slash = decoded.ends_with('/');
    let relative = decoded.trim_start_matches('/');

    let Ok(canonical) = root.join(relative).canonicalize() else {
        return Resolved::NotFound;
    };

    if !canonical.starts_with(root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {url_path}"));
        return Resolved::NotFound;
    }

    if canonical.is_dir() {
        if trailing_slash {
            Resolved::Directory(canonical)
        } else {
            Resolved::RedirectToSlash
        }
    } else {
        Resolved::File(canonical)
    }
}

/// Serve a regular file, honoring `If-Modified-Since`
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    path: &Path,
) -> Response<Full<Bytes>> {
    let mtime = match fs::metadata(path).await {
        Ok(metadata) => metadata.modified().ok(),
        Err(e) => return read_error_response(path, &e),
    };

    if let Some(mtime) = mtime {
        if conditional::not_modified(ctx.if_modified_since.as_deref(), mtime) {
            return http::build_304_response(&conditional::format_http_date(mtime));
        }
    }

    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) => return read_error_response(path, &e),
    };

    http::build_file_response(
        content,
        state.mime.for_path(path),
        mtime.map(conditional::format_http_date),
        ctx.is_head,
    )
}

/// Serve a directory: index file if present, otherwise a generated listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    for index_file in &state.config.http.index_files {
        let candidate = dir.join(index_file);
        if candidate.is_file() {
            return serve_file(ctx, state, &candidate).await;
        }
    }

    if !state.config.http.directory_listing {
        return http::build_404_response();
    }

    match listing::render(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list '{}': {e}", dir.display()));
            http::build_500_response()
        }
    }
}

/// Map a filesystem read error to the matching HTTP error response
///
/// Missing files are ordinary (404, not logged); anything else
/// (permission denied, I/O failure) is a logged 500.
fn read_error_response(path: &Path, error: &std::io::Error) -> Response<Full<Bytes>> {
    if error.kind() == ErrorKind::NotFound {
        return http::build_404_response();
    }
    logger::log_error(&format!("Failed to read '{}': {error}", path.display()));
    http::build_500_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a scratch root under the OS temp dir
    fn test_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("devserve-test-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir.canonicalize().unwrap()
    }

    #[test]
    fn test_resolve_regular_file() {
        let root = test_root("file");
        std::fs::write(root.join("module.mjs"), b"export {};").unwrap();

        let resolved = resolve("/module.mjs", &root);
        assert_eq!(resolved, Resolved::File(root.join("module.mjs")));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_nested_file_with_encoding() {
        let root = test_root("encoded");
        std::fs::create_dir_all(root.join("my docs")).unwrap();
        std::fs::write(root.join("my docs/a.txt"), b"hi").unwrap();

        let resolved = resolve("/my%20docs/a.txt", &root);
        assert_eq!(resolved, Resolved::File(root.join("my docs/a.txt")));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_missing_path() {
        let root = test_root("missing");
        assert_eq!(resolve("/does/not/exist", &root), Resolved::NotFound);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_blocks_traversal() {
        let root = test_root("traversal");
        // /etc exists on the host but sits outside the root
        assert_eq!(resolve("/../../../etc/passwd", &root), Resolved::NotFound);
        assert_eq!(resolve("/%2e%2e/%2e%2e/etc/passwd", &root), Resolved::NotFound);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_directory_requires_slash() {
        let root = test_root("dir-slash");
        std::fs::create_dir_all(root.join("sub")).unwrap();

        assert_eq!(resolve("/sub", &root), Resolved::RedirectToSlash);
        assert_eq!(resolve("/sub/", &root), Resolved::Directory(root.join("sub")));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_root_is_directory() {
        let root = test_root("root");
        assert_eq!(resolve("/", &root), Resolved::Directory(root.clone()));
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_read_error_mapping() {
        let missing = std::io::Error::new(ErrorKind::NotFound, "missing");
        assert_eq!(read_error_response(Path::new("/x"), &missing).status(), 404);

        let denied = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        assert_eq!(read_error_response(Path::new("/x"), &denied).status(), 500);
    }
}
