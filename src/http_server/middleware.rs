//! Per-response middleware: fixed headers and the access log.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::errors::Diagnostic;

/// `Server` header value
pub const SERVER_NAME: &str = concat!("wisdom/", env!("CARGO_PKG_VERSION"));

/// Versioned media-type marker
pub const MEDIA_TYPE_HEADER: &str = "x-wisdom-media-type";
pub const MEDIA_TYPE: &str = "wisdom.V1";

/// Content type of every response, JSONP included
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Stamp the three fixed headers on every response from `router`,
/// replacing whatever the handler set.
pub fn fixed_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::SERVER,
            HeaderValue::from_static(SERVER_NAME),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(MEDIA_TYPE_HEADER),
            HeaderValue::from_static(MEDIA_TYPE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE),
        ))
}

/// Log one line per request; failures also carry the call-site tag and cause.
pub async fn access_log(request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status().as_u16();

    match response.extensions().get::<Diagnostic>() {
        Some(diagnostic) => tracing::error!(
            peer = %peer,
            method = %method,
            uri = %uri,
            status,
            tag = diagnostic.tag,
            cause = %diagnostic.cause,
            "request failed"
        ),
        None => tracing::info!(peer = %peer, method = %method, uri = %uri, status, "request served"),
    }

    response
}
