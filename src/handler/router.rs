//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, logical path
//! extraction from the query string, and mapping browse results to responses.

use crate::config::AppState;
use crate::handler::browse::{browse, Outcome};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::resolver::{BrowseError, LogicalPath};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let config = &state.config;

    let mut entry = config
        .logging
        .access_log
        .then(|| AccessLogEntry::new(peer_addr, req.method(), req.uri(), req.version()));

    let response = match check_http_method(req.method()) {
        Some(resp) => resp,
        None => {
            let raw = query_value(req.uri().query(), &config.content.query_param).unwrap_or("");
            let logical = LogicalPath::decode(raw);
            if let Some(entry) = entry.as_mut() {
                entry.logical_path = Some(logical.to_string());
            }

            let result = browse(&state.root, &config.content, &logical).await;
            to_response(result, &logical, *req.method() == Method::HEAD)
        }
    };

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Only GET and HEAD are served
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Raw (still percent-encoded) value of the first `name` parameter
pub fn query_value<'a>(query: Option<&'a str>, name: &str) -> Option<&'a str> {
    query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then_some(value)
    })
}

/// Map a browse result to exactly one response
fn to_response(
    result: Result<Outcome, BrowseError>,
    logical: &LogicalPath,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match result {
        Ok(Outcome::File { body, content_type }) => {
            http::build_content_response(Bytes::from(body), content_type, is_head)
        }
        Ok(Outcome::Listing(html)) => http::build_html_response(html, is_head),
        Ok(Outcome::Redirect(target)) => http::build_redirect_response(&target),
        Err(BrowseError::ConfinementViolation) => {
            logger::log_warning(&format!("Path traversal attempt blocked: {logical}"));
            http::build_403_response()
        }
        Err(BrowseError::NotFound) => http::build_404_response(),
        Err(BrowseError::IoFailure(e)) => {
            logger::log_error(&format!("Failed to read '{logical}': {e}"));
            http::build_500_response()
        }
    }
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
