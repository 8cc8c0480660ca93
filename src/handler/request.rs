//! Request entry point
//!
//! Validates the method, dispatches to static file serving, stamps the
//! cache-defeating headers, and writes the access-log line. Every
//! response, success or error, leaves through the same exit point.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response};

use crate::config::ServerConfig;
use crate::handler::static_files;
use crate::http::{self, no_cache};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    config: Arc<ServerConfig>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let response = if method == Method::GET || is_head {
        let if_modified_since = req
            .headers()
            .get("if-modified-since")
            .and_then(|v| v.to_str().ok());
        static_files::serve(&config, &path, is_head, if_modified_since).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    let response = no_cache::apply(response);

    let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    logger::log_access(&entry);

    Ok(response)
}
