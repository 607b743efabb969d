//! Permanent redirect of every non-canonical host to the production host.

use axum::{
    extract::{Request, State},
    http::{StatusCode, Uri, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use deployment::Deployment;
use tracing::debug;

use crate::DeploymentImpl;

/// Path prefixes (after the leading `/`) served on any host.
const EXEMPT_PREFIXES: [&str; 4] = ["_next", "favicon.ico", "robots.txt", "sitemap.xml"];

pub async fn redirect_to_canonical_host(
    State(deployment): State<DeploymentImpl>,
    request: Request,
    next: Next,
) -> Response {
    let config = deployment.config();
    let host = request_host(&request);

    match canonical_redirect(host, request.uri(), &config.canonical_host, &config.dev_host) {
        Some(location) => {
            debug!(host, %location, "Redirecting to canonical host");
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        None => next.run(request).await,
    }
}

/// The `Host` header, or the URI authority when a client sent an absolute-form target
/// (HTTP/2 `:authority`) without one.
fn request_host(request: &Request) -> &str {
    request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().authority().map(|authority| authority.as_str()))
        .unwrap_or_default()
}

/// Where to send a request for `uri` that arrived on `host`, or `None` to serve it.
/// Path and query are preserved; scheme is always https and the port is dropped.
pub fn canonical_redirect(
    host: &str,
    uri: &Uri,
    canonical_host: &str,
    dev_host: &str,
) -> Option<String> {
    let path = uri.path().trim_start_matches('/');
    if EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return None;
    }
    if host == canonical_host || host == dev_host {
        return None;
    }

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Some(format!("https://{canonical_host}{path_and_query}"))
}
