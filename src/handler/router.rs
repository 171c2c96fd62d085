//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, static
//! file dispatch, CORS decoration, and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, cors};
use crate::logger::{self, AccessLogEntry};

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Every response leaves through the same exit: CORS headers are
/// applied to whatever the dispatch produced, then the access log
/// entry is written.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        method.to_string(),
        uri.path().to_string(),
    );
    entry.query = uri.query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.referer = header_value(&req, "referer");
    entry.user_agent = header_value(&req, "user-agent");

    let mut response = match check_http_method(method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: uri.path(),
                is_head,
                if_modified_since: header_value(&req, "if-modified-since"),
            };
            static_files::serve(&ctx, &state).await
        }
    };

    cors::apply(&mut response);

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method, returning a terminal response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Extract a header as an owned string, skipping non-UTF-8 values
fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_09 {
        "0.9"
    } else {
        "1.1"
    }
}

/// Exact body length of a built response (Full bodies know their size)
fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_gate() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());

        let options = check_http_method(&Method::OPTIONS).unwrap();
        assert_eq!(options.status(), 204);

        let post = check_http_method(&Method::POST).unwrap();
        assert_eq!(post.status(), 405);
        assert_eq!(post.headers().get("Allow").unwrap(), "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_body_len_reads_full_body_size() {
        let resp = http::build_file_response(b"hello".to_vec(), "text/plain", None, false);
        assert_eq!(body_len(&resp), 5);
    }

    #[test]
    fn test_http_version_label() {
        assert_eq!(http_version_label(Version::HTTP_11), "1.1");
        assert_eq!(http_version_label(Version::HTTP_10), "1.0");
    }
}
